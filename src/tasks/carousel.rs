use anyhow::{Context, Result};
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::carousel::Carousel;
use crate::events::{CarouselCommand, Rendered};

/// Owns the carousel and applies commands one at a time.
///
/// Rules:
/// - The carousel is the only mutable state and is touched only here.
/// - `Advance`/`Retreat` move the index and render; a `Rendered` note follows.
/// - Transitions on an empty slide set are silent no-ops.
/// - `Scroll` updates the tracked element's flag and emits nothing.
/// - Returns the final carousel on cancellation or once every sender is gone.
pub async fn run(
    mut carousel: Carousel,
    mut commands: Receiver<CarouselCommand>,
    rendered: Sender<Rendered>,
    cancel: CancellationToken,
) -> Result<Carousel> {
    let len = carousel.len();
    if !carousel.is_empty() {
        notify(
            &rendered,
            Rendered {
                index: carousel.current_index(),
                len,
            },
        )
        .await;
    }

    loop {
        select! {
            _ = cancel.cancelled() => break,
            maybe_cmd = commands.recv() => {
                let Some(cmd) = maybe_cmd else {
                    info!("all command sources closed; carousel idle");
                    break;
                };
                let moved = match cmd {
                    CarouselCommand::Advance => carousel.advance().context("advance failed")?,
                    CarouselCommand::Retreat => carousel.retreat().context("retreat failed")?,
                    CarouselCommand::Scroll { offset } => {
                        let flag = carousel.on_scroll(offset).context("scroll update failed")?;
                        debug!(offset, ?flag, "scroll handled");
                        None
                    }
                };
                if let Some(index) = moved {
                    notify(&rendered, Rendered { index, len }).await;
                }
            }
        }
    }

    Ok(carousel)
}

async fn notify(rendered: &Sender<Rendered>, note: Rendered) {
    if rendered.send(note).await.is_err() {
        // Nobody listening is not fatal; the document is still updated.
        warn!(index = note.index, "render listener closed");
    }
}
