use std::io::{self, Write};

use serde_json::Value;

use super::config::{OutputConfig, OutputFormat};
use super::types::Envelope;

pub trait Presenter: Send + Sync {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

/// Prints the `reply` field of the result, falling back to the op name.
pub struct TextPresenter { pub pretty: bool }
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        match env.result.get("reply").and_then(Value::as_str) {
            Some(reply) => write!(w, "{}", reply)?,
            None => writeln!(w, "Result: {}", env.op)?,
        }
        if self.pretty {
            serde_json::to_writer_pretty(&mut *w, &env.result).map_err(to_io)?;
            writeln!(w)?;
        }
        Ok(())
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter { pretty: cfg.pretty }),
        };
        Emitter { presenter }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout();
        self.presenter.emit(env, &mut out)?;
        out.flush()
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(p: &dyn Presenter, env: &Envelope) -> String {
        let mut buf: Vec<u8> = Vec::new();
        p.emit(env, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_presenter_prints_reply_verbatim() {
        let env = Envelope::result("lookup", &json!({"reply": "*Präsens*:\nich gehe\n"}), None).unwrap();
        assert_eq!(render(&TextPresenter { pretty: false }, &env), "*Präsens*:\nich gehe\n");
    }

    #[test]
    fn text_presenter_without_reply_names_op() {
        let env = Envelope::result("parse", &json!({"found": false}), None).unwrap();
        assert_eq!(render(&TextPresenter { pretty: false }, &env), "Result: parse\n");
    }

    #[test]
    fn json_presenter_writes_one_line() {
        let env = Envelope::result("lookup", &json!({"reply": "x"}), None).unwrap();
        let out = render(&JsonPresenter { pretty: false }, &env);
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("\"op\":\"lookup\""));
    }
}
