use sparselife::{Board, CellContainer, Changes};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

const REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// What the host keeps of one generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub alive: usize,
    pub changes: Changes,
}
impl Sample {
    pub fn of(board: &Board) -> Self {
        Self {
            alive: board.population(),
            changes: board.last_changes(),
        }
    }
}

pub trait Recorder {
    fn record(&mut self, sample: Sample);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> String;
}

/// Periodic `gen/s` line with the births and deaths since the last one.
pub struct SimpleRecord {
    gens: usize,
    alive: usize,
    window: Changes,
    gens_in_report: usize,
    last_report: Instant,
}
impl SimpleRecord {
    pub fn new(alive: usize) -> Self {
        Self {
            gens: 0,
            alive,
            window: Changes::default(),
            gens_in_report: 0,
            last_report: Instant::now(),
        }
    }
}
impl Recorder for SimpleRecord {
    fn record(&mut self, sample: Sample) {
        self.gens += 1;
        self.gens_in_report += 1;
        self.alive = sample.alive;
        self.window.births += sample.changes.births;
        self.window.deaths += sample.changes.deaths;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed() >= REPORT_INTERVAL
    }
    fn report(&mut self) -> String {
        let elapsed = self.last_report.elapsed().as_secs_f64();
        let gens_per_sec = if elapsed > 0.0 {
            self.gens_in_report as f64 / elapsed
        } else {
            0.0
        };
        let Changes { births, deaths } = std::mem::take(&mut self.window);
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        format!(
            "{:.02}gen/s gens:{}, alive:{}, births:{}, deaths:{}",
            gens_per_sec, self.gens, self.alive, births, deaths
        )
    }
}

/// Keeps one row per generation on top of the periodic report.
pub struct CsvRecord {
    inner: SimpleRecord,
    rows: Vec<(u128, Sample)>,
    last: Instant,
}
impl CsvRecord {
    pub fn new(alive: usize) -> Self {
        Self {
            inner: SimpleRecord::new(alive),
            rows: Vec::new(),
            last: Instant::now(),
        }
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"gen,delta_us,alive,births,deaths\n")?;
        for (i, (delta, sample)) in self.rows.iter().enumerate() {
            let Changes { births, deaths } = sample.changes;
            writeln!(out, "{},{},{},{},{}", i + 1, delta, sample.alive, births, deaths)?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}
impl Recorder for CsvRecord {
    fn record(&mut self, sample: Sample) {
        let delta = self.last.elapsed().as_micros();
        self.last = Instant::now();

        self.rows.push((delta, sample));
        self.inner.record(sample);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> String {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvRecord),
    Simple(SimpleRecord),
}
impl SwitchRecorder {
    pub fn new(alive: usize, csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new(alive))
        } else {
            Self::Simple(SimpleRecord::new(alive))
        }
    }

    /// Writes the per-generation rows; a no-op without csv recording.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Simple(_) => Ok(()),
        }
    }
}
impl Recorder for SwitchRecorder {
    fn record(&mut self, sample: Sample) {
        match self {
            Self::Csv(r) => r.record(sample),
            Self::Simple(r) => r.record(sample),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Csv(r) => r.has_report(),
            Self::Simple(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> String {
        match self {
            Self::Csv(r) => r.report(),
            Self::Simple(r) => r.report(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparselife::{Pattern, Pos2, Topology};

    fn blinker_board() -> Board {
        let blinker: Pattern = [(0, 0), (1, 0), (2, 0)].into_iter().map(Pos2::from).collect();
        Board::from_pattern(&blinker, Topology::Unbounded)
    }

    #[test]
    fn report_sums_changes_since_last_report() {
        let mut board = blinker_board();
        let mut stats = SimpleRecord::new(board.population());
        for _ in 0..2 {
            board.advance();
            stats.record(Sample::of(&board));
        }

        let report = stats.report();
        assert!(report.ends_with("gens:2, alive:3, births:4, deaths:4"), "{}", report);
        assert!(!stats.has_report());

        board.advance();
        stats.record(Sample::of(&board));
        let report = stats.report();
        assert!(report.ends_with("gens:3, alive:3, births:2, deaths:2"), "{}", report);
    }

    #[test]
    fn csv_has_a_row_per_generation() {
        let mut stats = CsvRecord::new(3);
        let samples = [
            Sample {
                alive: 4,
                changes: Changes {
                    births: 1,
                    deaths: 0,
                },
            },
            Sample::default(),
            Sample {
                alive: 5,
                changes: Changes {
                    births: 3,
                    deaths: 2,
                },
            },
        ];
        for sample in samples {
            stats.record(sample);
        }

        let mut out = Vec::new();
        stats.write_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "gen,delta_us,alive,births,deaths");
        assert!(lines[1].starts_with("1,") && lines[1].ends_with(",4,1,0"));
        assert!(lines[2].ends_with(",0,0,0"));
        assert!(lines[3].starts_with("3,") && lines[3].ends_with(",5,3,2"));
    }

    #[test]
    fn simple_recorder_saves_nothing() {
        let stats = SwitchRecorder::new(0, false);

        assert!(stats.save("/nonexistent/dir/stats.csv").is_ok());
    }
}
