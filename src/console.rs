use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyModifiers},
    execute, queue, terminal,
};
use sparselife::{Board, Pos2};
use std::io;

pub enum ConsoleCommand {
    Exit,
    /// advance one generation while paused
    Step,
    Handled,
}

pub struct ConsoleRender {
    tl: Pos2,
    report: String,
    paused: bool,
}
impl ConsoleRender {
    pub fn new(paused: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self {
            tl: Pos2::default(),
            report: String::new(),
            paused,
        })
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn render(&self, board: &Board) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // the last row is the footer
        let br = self.tl
            + Pos2 {
                x: cols as i32,
                y: rows.saturating_sub(1) as i32,
            };
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in board.window(self.tl, br).iter() {
            let cell = cell - self.tl;
            queue!(stdout, cursor::MoveTo(cell.x as u16, cell.y as u16))?;
            io::Write::write_all(&mut stdout, "█".as_bytes())?;
        }

        // write footer
        queue!(stdout, cursor::MoveTo(0, rows.saturating_sub(1)))?;
        if self.paused {
            io::Write::write_all(&mut stdout, b"[paused] ")?;
        }
        io::Write::write_all(&mut stdout, self.report.as_bytes())?;

        io::Write::flush(&mut stdout)
    }

    pub fn poll_events(&mut self) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is preset for us to take
        if !event::poll(std::time::Duration::from_secs(0))? {
            return Ok(None);
        }

        let event::Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            return Ok(Some(ConsoleCommand::Handled));
        };

        let cmd = match code {
            // CTRL+C
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                ConsoleCommand::Exit
            }
            KeyCode::Char('q') | KeyCode::Esc => ConsoleCommand::Exit,
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                ConsoleCommand::Handled
            }
            KeyCode::Right if self.paused => ConsoleCommand::Step,
            // arrows to move the view
            KeyCode::Up => {
                self.tl.y -= 1;
                ConsoleCommand::Handled
            }
            KeyCode::Down => {
                self.tl.y += 1;
                ConsoleCommand::Handled
            }
            KeyCode::Left => {
                self.tl.x -= 1;
                ConsoleCommand::Handled
            }
            KeyCode::Right => {
                self.tl.x += 1;
                ConsoleCommand::Handled
            }
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(cmd))
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // nothing sensible to do if the terminal is already gone
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), cursor::Show);
    }
}
