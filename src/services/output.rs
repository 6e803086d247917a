use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use serde::Serialize;

/// Report on stdout: the `{"ok": true, "data": ...}` envelope in JSON mode,
/// the `text` rendering otherwise.
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    text: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", text(&data));
    }
    Ok(())
}

/// JSON errors go to stdout so callers parse a single stream; text errors go
/// to stderr.
pub fn print_error(json: bool, code: &str, message: &str) {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(s) => println!("{s}"),
            Err(_) => eprintln!("error[{code}]: {message}"),
        }
    } else {
        eprintln!("error[{code}]: {message}");
    }
}
