//! Maps detection boxes from source-video pixels onto a "contain"-fitted canvas.
//!
//! The video is scaled to fit the canvas while keeping its aspect ratio and is
//! centred, leaving padding bars on one axis. Everything here is pure math so it
//! can be exercised without a window.

use crate::common::BoundingBox;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl FrameSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Destination rectangle, relative to the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl OverlayRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Places the rectangle on screen given the canvas's top-left corner.
    pub fn to_screen(&self, canvas_origin: egui::Pos2) -> egui::Rect {
        egui::Rect::from_min_size(
            canvas_origin + egui::vec2(self.left, self.top),
            egui::vec2(self.width, self.height),
        )
    }
}

/// Where the video lands inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub render_width: f32,
    pub render_height: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

impl Letterbox {
    /// Returns `None` when either size is degenerate, so callers skip drawing.
    pub fn fit(source: FrameSize, canvas: FrameSize) -> Option<Self> {
        if !source.is_drawable() || !canvas.is_drawable() {
            return None;
        }

        let video_aspect = source.aspect();
        if video_aspect > canvas.aspect() {
            let render_height = canvas.width / video_aspect;
            Some(Self {
                render_width: canvas.width,
                render_height,
                x_offset: 0.0,
                y_offset: (canvas.height - render_height) / 2.0,
            })
        } else {
            let render_width = canvas.height * video_aspect;
            Some(Self {
                render_width,
                render_height: canvas.height,
                x_offset: (canvas.width - render_width) / 2.0,
                y_offset: 0.0,
            })
        }
    }

    pub fn render_area(&self) -> OverlayRect {
        OverlayRect {
            left: self.x_offset,
            top: self.y_offset,
            width: self.render_width,
            height: self.render_height,
        }
    }

    pub fn map(&self, source: FrameSize, bbox: &BoundingBox) -> OverlayRect {
        let scale_x = self.render_width / source.width;
        let scale_y = self.render_height / source.height;
        OverlayRect {
            left: bbox.x1 * scale_x + self.x_offset,
            top: bbox.y1 * scale_y + self.y_offset,
            width: bbox.width() * scale_x,
            height: bbox.height() * scale_y,
        }
    }
}

pub fn map_box(source: FrameSize, canvas: FrameSize, bbox: &BoundingBox) -> Option<OverlayRect> {
    Letterbox::fit(source, canvas).map(|letterbox| letterbox.map(source, bbox))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.05;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn wide_video_in_square_canvas_is_letterboxed() {
        let source = FrameSize::new(1920.0, 1080.0);
        let canvas = FrameSize::new(800.0, 800.0);
        let letterbox = Letterbox::fit(source, canvas).unwrap();
        assert!(close(letterbox.render_width, 800.0));
        assert!(close(letterbox.render_height, 450.0));
        assert!(close(letterbox.x_offset, 0.0));
        assert!(close(letterbox.y_offset, 175.0));

        let rect = letterbox.map(source, &BoundingBox::new(100.0, 100.0, 300.0, 300.0));
        assert!(close(rect.left, 41.67), "left = {}", rect.left);
        assert!(close(rect.top, 216.67), "top = {}", rect.top);
        assert!(close(rect.width, 83.33), "width = {}", rect.width);
        assert!(close(rect.height, 83.33), "height = {}", rect.height);
    }

    #[test]
    fn tall_video_in_wide_canvas_is_pillarboxed() {
        let source = FrameSize::new(1080.0, 1920.0);
        let canvas = FrameSize::new(1600.0, 900.0);
        let letterbox = Letterbox::fit(source, canvas).unwrap();
        assert!(close(letterbox.render_height, 900.0));
        assert!(close(letterbox.render_width, 506.25));
        assert!(close(letterbox.x_offset, (1600.0 - 506.25) / 2.0));
        assert!(close(letterbox.y_offset, 0.0));
    }

    #[test]
    fn equal_aspect_fills_canvas() {
        let rect = map_box(
            FrameSize::new(640.0, 360.0),
            FrameSize::new(1280.0, 720.0),
            &BoundingBox::new(0.0, 0.0, 640.0, 360.0),
        )
        .unwrap();
        assert!(close(rect.left, 0.0));
        assert!(close(rect.top, 0.0));
        assert!(close(rect.width, 1280.0));
        assert!(close(rect.height, 720.0));
    }

    #[test]
    fn degenerate_sizes_produce_nothing() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(map_box(FrameSize::new(0.0, 1080.0), FrameSize::new(800.0, 800.0), &bbox).is_none());
        assert!(map_box(FrameSize::new(1920.0, 1080.0), FrameSize::new(800.0, 0.0), &bbox).is_none());
        assert!(map_box(FrameSize::new(f32::NAN, 1.0), FrameSize::new(1.0, 1.0), &bbox).is_none());
    }

    #[test]
    fn mapping_is_deterministic() {
        let source = FrameSize::new(1280.0, 720.0);
        let canvas = FrameSize::new(917.0, 533.0);
        let bbox = BoundingBox::new(12.0, 40.0, 700.0, 650.0);
        assert_eq!(map_box(source, canvas, &bbox), map_box(source, canvas, &bbox));
    }

    #[test]
    fn boxes_inside_the_frame_stay_inside_the_render_area() {
        let sources = [(1920.0, 1080.0), (1080.0, 1920.0), (640.0, 480.0), (333.0, 777.0)];
        let canvases = [(800.0, 800.0), (1600.0, 900.0), (300.0, 1200.0), (1.0, 1.0)];
        for &(sw, sh) in &sources {
            for &(cw, ch) in &canvases {
                let source = FrameSize::new(sw, sh);
                let canvas = FrameSize::new(cw, ch);
                let area = Letterbox::fit(source, canvas).unwrap().render_area();
                let boxes = [
                    BoundingBox::new(0.0, 0.0, sw, sh),
                    BoundingBox::new(sw * 0.25, sh * 0.1, sw * 0.5, sh * 0.9),
                    BoundingBox::new(sw - 1.0, sh - 1.0, sw, sh),
                ];
                for bbox in &boxes {
                    let rect = map_box(source, canvas, bbox).unwrap();
                    let tol = 1e-3 * cw.max(ch);
                    assert!(rect.left >= area.left - tol, "{rect:?} vs {area:?}");
                    assert!(rect.top >= area.top - tol, "{rect:?} vs {area:?}");
                    assert!(rect.right() <= area.right() + tol, "{rect:?} vs {area:?}");
                    assert!(rect.bottom() <= area.bottom() + tol, "{rect:?} vs {area:?}");
                }
            }
        }
    }

    #[test]
    fn screen_rect_is_offset_by_canvas_origin() {
        let rect = OverlayRect {
            left: 10.0,
            top: 20.0,
            width: 30.0,
            height: 40.0,
        };
        let screen = rect.to_screen(egui::pos2(100.0, 200.0));
        assert_eq!(screen.min, egui::pos2(110.0, 220.0));
        assert_eq!(screen.max, egui::pos2(140.0, 260.0));
    }
}
