use std::io::{self, BufRead, Write};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, info, warn};
use quote_core::Quote;

use crate::api::{ApiError, QuoteApi};
use crate::page::{FetchSeq, Page};

const TICK_RATE_MS: u64 = 200;

const HELP: &str = "commands: n - new quote | a <text> | <author> - add quote | q - quit";

/// Всё, что может разбудить цикл доски
pub(crate) enum Event {
    Input(String),
    InputClosed,
    Fetched(FetchSeq, Result<Quote, ApiError>),
    Submitted(Result<(), ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BoardCommand {
    NewQuote,
    Add { text: String, author: String },
    Quit,
    Help,
    Empty,
    Unknown(String),
}

/// Разбирает строку ввода. Для `a` автор — всё после последнего `|`,
/// без `|` автор пустой (и валидация формы это поймает).
pub(crate) fn parse_command(line: &str) -> BoardCommand {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r),
        None => (line, ""),
    };

    match cmd {
        "" => BoardCommand::Empty,
        "n" | "new" => BoardCommand::NewQuote,
        "q" | "quit" => BoardCommand::Quit,
        "h" | "help" | "?" => BoardCommand::Help,
        "a" | "add" => {
            let (text, author) = rest.rsplit_once('|').unwrap_or((rest, ""));
            BoardCommand::Add {
                text: text.to_string(),
                author: author.to_string(),
            }
        }
        other => BoardCommand::Unknown(other.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

pub(crate) struct Board<W: Write> {
    pub(crate) page: Page,
    api: Arc<dyn QuoteApi>,
    tx: Sender<Event>,
    out: W,
    workers: Vec<thread::JoinHandle<()>>,
}

impl<W: Write> Board<W> {
    pub(crate) fn new(api: Arc<dyn QuoteApi>, tx: Sender<Event>, out: W) -> Self {
        Self {
            page: Page::new(),
            api,
            tx,
            out,
            workers: Vec::new(),
        }
    }

    /// Запрос цитаты в отдельном потоке; результат придёт как [`Event::Fetched`]
    pub(crate) fn spawn_fetch(&mut self) {
        let seq = self.page.begin_fetch();
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.workers.push(thread::spawn(move || {
            let result = api.random_quote();
            if tx.send(Event::Fetched(seq, result)).is_err() {
                debug!("board is gone; dropping quote #{seq}");
            }
        }));
    }

    /// Валидация на месте, POST в отдельном потоке. Форма не блокируется:
    /// повторная отправка до ответа уйдёт вторым запросом.
    pub(crate) fn spawn_submit(&mut self, now: Instant) {
        let Some(quote) = self.page.begin_submit(now) else {
            return;
        };
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.workers.push(thread::spawn(move || {
            let result = api.add_quote(&quote);
            if tx.send(Event::Submitted(result)).is_err() {
                debug!("board is gone; dropping submit result");
            }
        }));
    }

    pub(crate) fn handle(&mut self, ev: Event, now: Instant) -> io::Result<Flow> {
        match ev {
            Event::Input(line) => match parse_command(&line) {
                BoardCommand::NewQuote => self.spawn_fetch(),
                BoardCommand::Add { text, author } => {
                    self.page.text_input = text;
                    self.page.author_input = author;
                    self.spawn_submit(now);
                }
                BoardCommand::Quit => return Ok(Flow::Quit),
                BoardCommand::Help => writeln!(self.out, "{HELP}")?,
                BoardCommand::Empty => {}
                BoardCommand::Unknown(cmd) => writeln!(self.out, "unknown command: {cmd}. {HELP}")?,
            },
            Event::InputClosed => return Ok(Flow::Quit),
            Event::Fetched(seq, result) => {
                if !self.page.apply_fetch(seq, result) {
                    return Ok(Flow::Continue);
                }
            }
            Event::Submitted(result) => self.page.apply_submit(result, now),
        }

        self.redraw()?;
        Ok(Flow::Continue)
    }

    pub(crate) fn tick(&mut self, now: Instant) -> io::Result<()> {
        if self.page.tick(now) {
            self.redraw()?;
        }
        self.reap_finished_workers();
        Ok(())
    }

    fn redraw(&mut self) -> io::Result<()> {
        self.out.write_all(self.page.render().as_bytes())?;
        self.out.flush()
    }

    fn reap_finished_workers(&mut self) {
        let mut i = 0;
        while i < self.workers.len() {
            if self.workers[i].is_finished() {
                let h = self.workers.swap_remove(i);
                if let Err(panic) = h.join() {
                    warn!("request thread panicked: {:?}", panic);
                }
            } else {
                i += 1;
            }
        }
    }

    fn join_workers(&mut self) {
        for h in self.workers.drain(..) {
            if let Err(panic) = h.join() {
                warn!("request thread panicked: {:?}", panic);
            }
        }
    }
}

/// Интерактивная доска: при старте грузит цитату, дальше читает команды со stdin.
pub(crate) fn run_board(api: Arc<dyn QuoteApi>, shutdown: Arc<AtomicBool>) -> anyhow::Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded();

    // поток stdin не джойним: блокирующее чтение не прервать
    spawn_stdin_reader(tx.clone());

    let mut board = Board::new(api, tx, io::stdout());
    writeln!(board.out, "{HELP}")?;
    board.spawn_fetch();
    board.redraw()?;

    let result = event_loop(&mut board, &rx, &shutdown);

    info!("waiting for in-flight requests...");
    board.join_workers();
    result
}

fn event_loop<W: Write>(
    board: &mut Board<W>,
    rx: &Receiver<Event>,
    shutdown: &AtomicBool,
) -> anyhow::Result<()> {
    let tick = Duration::from_millis(TICK_RATE_MS);

    loop {
        if shutdown.load(Ordering::Relaxed) {
            info!("shutting down board");
            return Ok(());
        }

        match rx.recv_timeout(tick) {
            Ok(ev) => {
                if board.handle(ev, Instant::now())? == Flow::Quit {
                    return Ok(());
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                // тик: проверим статус и shutdown
            }
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        board.tick(Instant::now())?;
    }
}

fn spawn_stdin_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    if tx.send(Event::Input(l)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("stdin read error: {e}");
                    break;
                }
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}
