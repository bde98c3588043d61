//! JSON-lines stdio transport.
//!
//! Each input line is one `ClientCommand`; each output line is one
//! `Outbound`. Blank lines are skipped and malformed lines are logged and
//! dropped.

use std::io::{BufRead, Write};
use std::sync::mpsc;

use arena_core::commands::ClientCommand;
use arena_core::state::Outbound;

use crate::state::LoopCommand;

/// Parse one input line. `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<ClientCommand>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Forward commands read from `input` until EOF, then ask the loop to stop.
pub fn pump_commands(input: impl BufRead, cmd_tx: &mpsc::Sender<LoopCommand>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("failed to read input: {e}");
                break;
            }
        };
        match parse_command(&line) {
            Ok(Some(cmd)) => {
                if cmd_tx.send(LoopCommand::Client(cmd)).is_err() {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("dropping malformed command {line:?}: {e}"),
        }
    }
    let _ = cmd_tx.send(LoopCommand::Shutdown);
}

/// Write every outbound message as one JSON line until the channel closes.
pub fn drain_outbound(outbound_rx: mpsc::Receiver<Outbound>, mut output: impl Write) -> std::io::Result<()> {
    for message in outbound_rx {
        let json = serde_json::to_string(&message)?;
        writeln!(output, "{json}")?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::state::{PlayerStatus, ServerMessage};
    use arena_core::types::ClientId;

    #[test]
    fn test_parse_command_lines() {
        assert_eq!(parse_command("   ").unwrap(), None);
        let cmd = parse_command(r#"{"type":"Disconnect","client":4}"#).unwrap();
        assert_eq!(
            cmd,
            Some(ClientCommand::Disconnect {
                client: ClientId(4)
            })
        );
        assert!(parse_command("{not json").is_err());
    }

    #[test]
    fn test_pump_skips_bad_lines_and_shuts_down() {
        let input = b"{\"type\":\"Connect\",\"client\":1,\"role\":\"vis\"}\ngarbage\n\n".as_slice();
        let (tx, rx) = mpsc::channel();
        pump_commands(input, &tx);

        let received: Vec<LoopCommand> = rx.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert!(matches!(
            received[0],
            LoopCommand::Client(ClientCommand::Connect { .. })
        ));
        assert!(matches!(received[1], LoopCommand::Shutdown));
    }

    #[test]
    fn test_drain_writes_json_lines() {
        let (tx, rx) = mpsc::channel();
        tx.send(Outbound {
            client: ClientId(2),
            message: ServerMessage::Status(PlayerStatus::default()),
        })
        .unwrap();
        drop(tx);

        let mut buffer = Vec::new();
        drain_outbound(rx, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with(r#"{"client":2,"message":{"type":"Status""#));
    }
}
