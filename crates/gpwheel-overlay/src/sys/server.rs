use crate::events::AppEvent;
use async_channel::Sender;
use gpwheel::SOCKET_PATH;
use gpwheel::catalog::{BrushAsset, Mode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

/// Stands in for an empty library id in `brush` commands.
pub const NO_LIBRARY: &str = "-";

/// Parses one protocol line. Unknown or malformed lines yield `None`.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match cmd {
        "show" => Some(AppEvent::Show),
        "hide" => Some(AppEvent::Hide),
        "mode" => rest.parse::<Mode>().ok().map(AppEvent::HostMode),
        "subject" => match rest {
            "on" => Some(AppEvent::Subject(true)),
            "off" => Some(AppEvent::Subject(false)),
            _ => None,
        },
        "brush" => {
            let mut parts = rest.splitn(3, ' ');
            let library_type = parts.next().filter(|s| !s.is_empty())?;
            let library = parts.next()?;
            let path = parts.next().map(str::trim).filter(|s| !s.is_empty())?;
            let library = if library == NO_LIBRARY { "" } else { library };
            Some(AppEvent::Brush(BrushAsset::new(library_type, library, path)))
        }
        _ => None,
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                let _ = tx.send(event).await;
                            }
                            None => log::warn!("Ignoring unknown command '{}'", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_state_commands() {
        assert_eq!(parse_command("show\n"), Some(AppEvent::Show));
        assert_eq!(parse_command(" hide "), Some(AppEvent::Hide));
        assert_eq!(parse_command("mode edit"), Some(AppEvent::HostMode(Mode::Edit)));
        assert_eq!(parse_command("subject off"), Some(AppEvent::Subject(false)));
        assert_eq!(parse_command("subject maybe"), None);
        assert_eq!(parse_command("mode"), None);
        assert_eq!(parse_command("spin"), None);
    }

    #[test]
    fn parses_host_mode_identifiers() {
        let cases = [
            ("mode WEIGHT_GPENCIL", Mode::Weight),
            ("mode WEIGHT_GREASE_PENCIL", Mode::Weight),
            ("mode PAINT_GPENCIL", Mode::Draw),
            ("mode PAINT_GREASE_PENCIL", Mode::Draw),
            ("mode VERTEX_GPENCIL", Mode::Vertex),
            ("mode VERTEX_GREASE_PENCIL", Mode::Vertex),
            ("mode EDIT_GPENCIL", Mode::Edit),
            ("mode EDIT", Mode::Edit),
            ("mode SCULPT_GPENCIL", Mode::Sculpt),
            ("mode SCULPT_GREASE_PENCIL", Mode::Sculpt),
            ("mode OBJECT", Mode::Object),
        ];

        for (line, expected) in cases {
            assert_eq!(parse_command(line), Some(AppEvent::HostMode(expected)), "{}", line);
        }
    }

    #[test]
    fn brush_path_keeps_spaces() {
        assert_eq!(
            parse_command("brush LOCAL - Brush/Ink Pen"),
            Some(AppEvent::Brush(BrushAsset::new("LOCAL", "", "Brush/Ink Pen")))
        );
        assert_eq!(
            parse_command("brush CUSTOM mylib Brush/Marker"),
            Some(AppEvent::Brush(BrushAsset::new("CUSTOM", "mylib", "Brush/Marker")))
        );
        assert_eq!(parse_command("brush LOCAL -"), None);
    }
}
