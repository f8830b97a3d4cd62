use std::io::{self, Write};

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

pub struct TextPresenter { pub pretty: bool }
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if let Some(err) = &env.error {
            return writeln!(w, "{} failed ({}): {}", env.op, err.status, err.message);
        }
        let Some(res) = &env.result else { return writeln!(w, "{}: no result", env.op) };
        if self.pretty {
            writeln!(w, "Result: {}", env.op)?;
            serde_json::to_writer_pretty(&mut *w, res).map_err(to_io)?;
            return writeln!(w);
        }
        match res.as_object() {
            Some(fields) => {
                for (k, v) in fields.iter().filter(|(k, _)| k.as_str() != "success") {
                    match v.as_str() {
                        Some(s) => writeln!(w, "{}: {}", k, s)?,
                        None => writeln!(w, "{}: {}", k, v)?,
                    }
                }
                Ok(())
            }
            None => writeln!(w, "{}", res),
        }
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn from_config(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter { pretty: cfg.pretty }),
        };
        Emitter { presenter }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout();
        self.emit_to(env, &mut out)?;
        out.flush()
    }

    pub fn emit_to(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        self.presenter.emit(env, w)
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }
