use std::io::BufRead;
use std::thread;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::Error;
use crate::events::CarouselCommand;

/// Parse one control line: `next`/`n`, `prev`/`p`, or `scroll <px>`.
///
/// # Errors
/// Returns [`Error::UnknownCommand`] for any other line and
/// [`Error::BadScrollOffset`] when the scroll offset is not a finite number.
pub fn parse_command(line: &str) -> Result<CarouselCommand, Error> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default().to_ascii_lowercase();
    let cmd = match head.as_str() {
        "next" | "n" => CarouselCommand::Advance,
        "prev" | "p" => CarouselCommand::Retreat,
        "scroll" => {
            let raw = words.next().unwrap_or_default();
            let offset = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::BadScrollOffset(raw.to_string()))?;
            CarouselCommand::Scroll { offset }
        }
        _ => return Err(Error::UnknownCommand(line.trim().to_string())),
    };
    if let Some(extra) = words.next() {
        return Err(Error::UnknownCommand(format!("{} {extra}", head)));
    }
    Ok(cmd)
}

/// Read `input` line by line on a dedicated OS thread.
///
/// The thread is detached: a read that never returns does not hold up runtime
/// shutdown. It exits on EOF, on a read error, or once the receiver is dropped.
pub fn spawn_line_reader<R>(input: R) -> Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<String>(16);
    let spawned = thread::Builder::new()
        .name("control-input".into())
        .spawn(move || {
            for line in input.lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!("failed to read control input: {err}");
                        break;
                    }
                }
            }
            debug!("control input closed");
        });
    if let Err(err) = spawned {
        // rx reports closed immediately, which ends the controls task
        warn!("failed to spawn control input reader: {err}");
    }
    rx
}

/// Forward manual prev/next controls from `lines` to the carousel.
///
/// Blank lines are skipped and malformed lines are logged and ignored.
/// Returns when the input ends, `cancel` fires, or the carousel goes away.
pub async fn run(
    mut lines: Receiver<String>,
    to_carousel: Sender<CarouselCommand>,
    cancel: CancellationToken,
) -> Result<()> {
    loop {
        select! {
            _ = cancel.cancelled() => break,
            line = lines.recv() => {
                let Some(line) = line else {
                    debug!("control input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(cmd) => {
                        if to_carousel.send(cmd).await.is_err() {
                            warn!("carousel channel closed; ignoring further controls");
                            break;
                        }
                    }
                    Err(err) => warn!("{err}"),
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!(parse_command("next").unwrap(), CarouselCommand::Advance);
        assert_eq!(parse_command(" N ").unwrap(), CarouselCommand::Advance);
        assert_eq!(parse_command("prev").unwrap(), CarouselCommand::Retreat);
        assert_eq!(parse_command("p").unwrap(), CarouselCommand::Retreat);
    }

    #[test]
    fn parses_scroll_offset() {
        assert_eq!(
            parse_command("scroll 640.5").unwrap(),
            CarouselCommand::Scroll { offset: 640.5 }
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            parse_command("jump 3"),
            Err(Error::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_command("scroll"),
            Err(Error::BadScrollOffset(raw)) if raw.is_empty()
        ));
        assert!(matches!(
            parse_command("scroll NaN"),
            Err(Error::BadScrollOffset(_))
        ));
        assert!(matches!(
            parse_command("next now"),
            Err(Error::UnknownCommand(_))
        ));
    }

    #[test]
    fn line_reader_forwards_until_eof() {
        let input = std::io::Cursor::new(b"next\nscroll 10\n".to_vec());
        let mut rx = spawn_line_reader(input);
        assert_eq!(rx.blocking_recv().as_deref(), Some("next"));
        assert_eq!(rx.blocking_recv().as_deref(), Some("scroll 10"));
        assert_eq!(rx.blocking_recv(), None);
    }

    #[tokio::test]
    async fn cancel_ends_run_while_input_is_silent() {
        let (_held_open, lines) = mpsc::channel::<String>(1);
        let (to_carousel, _from_controls) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(lines, to_carousel, cancel.clone()));

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!handle.is_finished(), "run must wait for input");

        cancel.cancel();
        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .expect("run should return promptly after cancel")
            .unwrap()
            .unwrap();
    }
}
