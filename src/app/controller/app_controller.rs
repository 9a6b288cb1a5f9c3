use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::app::controller::chat_flow;
use crate::app::controller::dashboard_state::DashboardState;
use crate::app::controller::upload_flow::UploadTracker;
use crate::common::{BoundingBox, ChatMessage, DetectionEvent};
use crate::config::Settings;
use crate::error::{AppError, MediaError, NetworkError};
use crate::network::{HttpKnowledgeBase, HttpVideoProcessor, KnowledgeBase, VideoProcessor};
use crate::overlay::FrameSize;
use crate::playback::{
    ClockMedia, FfprobeProbe, MediaProbe, MediaSurface, PlaybackPhase, PlaybackState,
    PlaybackSynchronizer, SyncRequest, VideoInfo,
};

const UPDATE_BUFFER_SIZE: usize = 100;

/// Results of background work, applied on the UI thread.
#[derive(Debug)]
pub enum UiUpdate {
    ProcessingFinished {
        seq: u64,
        result: Result<Vec<DetectionEvent>, NetworkError>,
    },
    MediaProbed {
        seq: u64,
        result: Result<VideoInfo, MediaError>,
    },
    AssistantReplied(ChatMessage),
}

pub struct AppController {
    state: DashboardState,
    uploads: UploadTracker,
    media: Box<dyn MediaSurface>,
    sync: PlaybackSynchronizer,
    processor: Arc<dyn VideoProcessor>,
    knowledge_base: Arc<dyn KnowledgeBase>,
    probe: Arc<dyn MediaProbe>,
    runtime: Handle,
    repaint: Option<egui::Context>,
    update_tx: Sender<UiUpdate>,
    update_rx: Receiver<UiUpdate>,
}

impl AppController {
    pub fn builder() -> AppControllerBuilder {
        AppControllerBuilder::new()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn playback(&self) -> PlaybackState {
        self.sync.state()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.sync.phase()
    }

    pub fn has_source(&self) -> bool {
        self.media.source().is_some()
    }

    pub fn intrinsic_size(&self) -> Option<FrameSize> {
        self.media.intrinsic_size()
    }

    /// The box to paint over the feed right now, if any.
    pub fn overlay_box(&self) -> Option<BoundingBox> {
        self.sync
            .overlay_box(self.state.selected.as_ref(), self.media.intrinsic_size())
    }

    /// A new video was chosen: reset the session's view of it and send it off
    /// for processing.
    pub fn select_file(&mut self, path: PathBuf) {
        if self.state.is_processing {
            warn!("New upload supersedes the one still in flight");
        }
        let seq = self.uploads.begin(&mut self.state);
        let request = self.sync.on_new_source();
        self.apply_sync_request(request);
        self.media.load(path.clone());
        info!("Selected {} (upload {})", path.display(), seq);

        let processor = Arc::clone(&self.processor);
        let upload_path = path.clone();
        self.spawn_update(async move {
            let result = processor.process_video(&upload_path).await;
            UiUpdate::ProcessingFinished { seq, result }
        });

        let probe = Arc::clone(&self.probe);
        self.spawn_update(async move {
            let result = probe.probe(&path).await;
            UiUpdate::MediaProbed { seq, result }
        });
    }

    /// Returns false when there was nothing to send.
    pub fn submit_question(&mut self, text: &str) -> bool {
        let question = text.trim();
        if question.is_empty() {
            return false;
        }
        self.state.messages.push(ChatMessage::operator(question));

        let knowledge_base = Arc::clone(&self.knowledge_base);
        let question = question.to_string();
        self.spawn_update(async move {
            UiUpdate::AssistantReplied(chat_flow::answer(knowledge_base.as_ref(), &question).await)
        });
        true
    }

    pub fn select_detection(&mut self, index: usize, now: Instant) -> bool {
        let Some(event) = self.state.select(index).cloned() else {
            warn!("No detection at position {}", index);
            return false;
        };
        self.sync.on_event_selected(&event, &mut *self.media, now);
        true
    }

    pub fn toggle_playback(&mut self, now: Instant) {
        if !self.has_source() {
            return;
        }
        if self.media.is_paused() {
            self.media.play(now);
        } else {
            self.media.pause(now);
        }
    }

    /// One UI frame: apply finished background work, advance playback and
    /// fire any redraw that has come due.
    pub fn tick(&mut self, now: Instant) {
        loop {
            match self.update_rx.try_recv() {
                Ok(update) => self.apply_update(update),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    error!("UI update channel disconnected");
                    break;
                }
            }
        }

        self.media.advance(now);
        self.dispatch_media_events();

        if self.sync.take_due_redraw(now) {
            self.redraw();
        }
    }

    /// Waits for the next background result and applies it.
    pub async fn wait_for_update(&mut self) -> bool {
        match self.update_rx.recv().await {
            Some(update) => {
                self.apply_update(update);
                self.dispatch_media_events();
                true
            }
            None => false,
        }
    }

    /// True while work is scheduled that will change what is on screen.
    pub fn needs_frequent_repaint(&self) -> bool {
        self.sync.state().is_playing || self.sync.redraw_pending() || self.state.is_processing
    }

    fn apply_update(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::ProcessingFinished { seq, result } => {
                self.uploads.finish(&mut self.state, seq, result);
            }
            UiUpdate::MediaProbed { seq, result } => {
                if !self.uploads.is_current(seq) {
                    debug!("Discarding metadata of superseded upload {}", seq);
                    return;
                }
                match result {
                    Ok(info) => self.media.set_metadata(info),
                    Err(e) => warn!("Could not read video metadata: {}", e),
                }
            }
            UiUpdate::AssistantReplied(message) => {
                self.state.messages.push(message);
            }
        }
    }

    fn dispatch_media_events(&mut self) {
        for event in self.media.take_events() {
            if let Some(request) = self.sync.on_media_event(event) {
                self.apply_sync_request(request);
            }
        }
    }

    fn apply_sync_request(&mut self, request: SyncRequest) {
        match request {
            SyncRequest::ClearSelection => {
                self.state.clear_selection();
                self.redraw();
            }
            SyncRequest::Redraw => self.redraw(),
        }
    }

    fn redraw(&mut self) {
        self.sync
            .redraw(self.state.selected.as_ref(), self.media.intrinsic_size());
    }

    fn spawn_update<F>(&self, work: F)
    where
        F: Future<Output = UiUpdate> + Send + 'static,
    {
        let update_tx = self.update_tx.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let update = work.await;
            if let Err(e) = update_tx.send(update).await {
                error!("Error sending UI update: {}", e);
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}

pub struct AppControllerBuilder {
    processor: Option<Arc<dyn VideoProcessor>>,
    knowledge_base: Option<Arc<dyn KnowledgeBase>>,
    probe: Option<Arc<dyn MediaProbe>>,
    media: Option<Box<dyn MediaSurface>>,
    runtime: Option<Handle>,
    repaint: Option<egui::Context>,
    redraw_delay: Duration,
}

impl Default for AppControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppControllerBuilder {
    pub fn new() -> Self {
        Self {
            processor: None,
            knowledge_base: None,
            probe: None,
            media: None,
            runtime: None,
            repaint: None,
            redraw_delay: Duration::from_millis(100),
        }
    }

    /// HTTP collaborators and timings taken from the settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        Ok(Self::new()
            .processor(Arc::new(HttpVideoProcessor::new(&settings.processing)?))
            .knowledge_base(Arc::new(HttpKnowledgeBase::new(&settings.assistant)?))
            .redraw_delay(settings.overlay.redraw_delay()))
    }

    pub fn processor(mut self, processor: Arc<dyn VideoProcessor>) -> Self {
        self.processor = Some(processor);
        self
    }

    pub fn knowledge_base(mut self, knowledge_base: Arc<dyn KnowledgeBase>) -> Self {
        self.knowledge_base = Some(knowledge_base);
        self
    }

    // Defaults to ffprobe on PATH.
    pub fn probe(mut self, probe: Arc<dyn MediaProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    // Defaults to a wall-clock surface.
    pub fn media(mut self, media: Box<dyn MediaSurface>) -> Self {
        self.media = Some(media);
        self
    }

    // Defaults to the runtime the builder is called from.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Woken whenever background work finishes.
    pub fn repaint_context(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn redraw_delay(mut self, redraw_delay: Duration) -> Self {
        self.redraw_delay = redraw_delay;
        self
    }

    pub fn build(self) -> Result<AppController, AppError> {
        let processor = self
            .processor
            .ok_or(AppError::Controller("Video processor not set".to_string()))?;
        let knowledge_base = self
            .knowledge_base
            .ok_or(AppError::Controller("Knowledge base not set".to_string()))?;
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|e| AppError::Controller(e.to_string()))?,
        };
        let (update_tx, update_rx) = mpsc::channel(UPDATE_BUFFER_SIZE);

        Ok(AppController {
            state: DashboardState::new(),
            uploads: UploadTracker::new(),
            media: self
                .media
                .unwrap_or_else(|| Box::new(ClockMedia::new()) as Box<dyn MediaSurface>),
            sync: PlaybackSynchronizer::new(self.redraw_delay),
            processor,
            knowledge_base,
            probe: self
                .probe
                .unwrap_or_else(|| Arc::new(FfprobeProbe::new()) as Arc<dyn MediaProbe>),
            runtime,
            repaint: self.repaint,
            update_tx,
            update_rx,
        })
    }
}
