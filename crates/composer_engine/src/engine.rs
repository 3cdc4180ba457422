use std::sync::{mpsc, Arc};
use std::thread;

use composer_core::DraftArticle;

use crate::session::{compose_article, ChannelProgressSink, ComposeSettings, ProgressSink};
use crate::surface::PageSurface;
use crate::types::{ComposeEvent, ComposeProgress, JobId, Stage};

enum ComposerCommand {
    Enqueue { job_id: JobId, draft: DraftArticle },
}

/// Owns the background composition thread. Queued jobs run strictly one at
/// a time: keyboard and pointer state is global to the page, so two
/// compositions must never interleave their input.
pub struct ComposerHandle {
    cmd_tx: mpsc::Sender<ComposerCommand>,
    event_rx: mpsc::Receiver<ComposeEvent>,
}

impl ComposerHandle {
    pub fn new(surface: Arc<dyn PageSurface>, settings: ComposeSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let event_tx = event_tx.clone();
                // block_on, not spawn: the next job must wait for this one.
                runtime.block_on(handle_command(
                    surface.as_ref(),
                    &settings,
                    command,
                    event_tx,
                ));
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn enqueue(&self, job_id: JobId, draft: DraftArticle) {
        let _ = self.cmd_tx.send(ComposerCommand::Enqueue { job_id, draft });
    }

    pub fn try_recv(&self) -> Option<ComposeEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    surface: &dyn PageSurface,
    settings: &ComposeSettings,
    command: ComposerCommand,
    event_tx: mpsc::Sender<ComposeEvent>,
) {
    match command {
        ComposerCommand::Enqueue { job_id, draft } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            sink.emit(ComposeEvent::Progress(ComposeProgress {
                job_id,
                stage: Stage::Queued,
                detail: None,
            }));
            let result = compose_article(surface, job_id, &draft, settings, &sink).await;
            let _ = event_tx.send(ComposeEvent::JobCompleted { job_id, result });
        }
    }
}
