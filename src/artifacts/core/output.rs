use is_terminal::IsTerminal;
use minus::Pager;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

const NO_PAGER_ENV: &str = "NO_PAGER";

/// Where command output ends up
///
/// Paging only happens for an interactive stdout and can be turned off with
/// `--no-pager` or the `NO_PAGER` environment variable. Paged output is
/// collected in memory and handed to the pager by [`Output::finish`].
pub enum Output {
    Plain,
    Paged(PageBuffer),
}

/// Shared in-memory sink; every writer handed out appends to the same bytes
#[derive(Clone, Default)]
pub struct PageBuffer(Rc<RefCell<Vec<u8>>>);

impl PageBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for PageBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Output {
    pub fn detect(no_pager: bool) -> Self {
        let interactive = io::stdout().is_terminal();
        if !interactive {
            colored::control::set_override(false);
        }

        if no_pager || !interactive || std::env::var_os(NO_PAGER_ENV).is_some() {
            Output::Plain
        } else {
            Output::Paged(PageBuffer::default())
        }
    }

    pub fn writer(&self) -> Box<dyn Write> {
        match self {
            Output::Plain => Box::new(io::stdout()),
            Output::Paged(buffer) => Box::new(buffer.clone()),
        }
    }

    /// Show the collected output in the pager, if any
    pub fn finish(self) -> anyhow::Result<()> {
        if let Output::Paged(buffer) = self {
            let pager = Pager::new();
            pager.set_text(buffer.contents())?;
            minus::page_all(pager)?;
        }
        Ok(())
    }
}
