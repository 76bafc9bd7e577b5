use std::time::Duration;

use sparselife::{Pattern, Pos2, Topology};

const USAGE: &str = "usage: sparselife [options]";

pub struct Args {
    matches: getopts::Matches,
}

fn options() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optflag("", "help", "print this help menu");
    opts.optflag("c", "console", "run in console mode");
    opts.optflag("t", "threads", "enables multi-threading");
    opts.optflag("", "wrap", "stitch opposite edges of the board together");
    opts.optflag("", "unbounded", "let the board grow without bounds");
    opts.optflag("", "paused", "start paused (console mode only)");
    opts.optopt("o", "output", "write the last generation as RLE", "FILE");
    opts.optopt("i", "input", "seed from an RLE file", "FILE");
    opts.optopt("p", "pattern", "seed from a named preset", "NAME");
    opts.optopt("x", "offset", "where the seed is placed", "X,Y");
    opts.optopt("w", "width", "set board rows (x range)", "WIDTH");
    opts.optopt("h", "height", "set board cols (y range)", "HEIGHT");
    opts.optopt("f", "fill", "set fill type", "TYPE");
    opts.optopt(
        "s",
        "sleep",
        "the amount of time to sleep between generations",
        "MILLIS",
    );
    opts.optopt("g", "gens", "max number of generations", "COUNT");
    opts.optopt("", "stats", "write stats csv to file", "FILE");
    opts
}

fn parse_offset(s: &str) -> Option<Pos2> {
    let (x, y) = s.split_once(',')?;
    Some(Pos2 {
        x: x.trim().parse().ok()?,
        y: y.trim().parse().ok()?,
    })
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Self, String> {
        let opts = options();
        let matches = opts
            .parse(args.iter().map(T::as_ref))
            .map_err(|err| format!("{}\n{}", err, opts.usage(USAGE)))?;
        if matches.opt_present("help") {
            return Err(opts.usage(USAGE));
        }

        let args = Self { matches };
        args.validate()
            .map_err(|err| format!("{}\n{}", err, opts.usage(USAGE)))?;
        Ok(args)
    }
    pub fn from_env() -> Result<Self, String> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    /// Rejects malformed values up front so the getters can't fail later.
    fn validate(&self) -> Result<(), String> {
        for name in ["width", "height"] {
            self.matches
                .opt_get::<i32>(name)
                .map_err(|err| format!("invalid --{}: {}", name, err))?;
        }
        self.matches
            .opt_get::<u64>("sleep")
            .map_err(|err| format!("invalid --sleep: {}", err))?;
        self.matches
            .opt_get::<usize>("gens")
            .map_err(|err| format!("invalid --gens: {}", err))?;
        if let Some(mode) = self.matches.opt_str("fill") {
            FillMode::new(&mode).ok_or_else(|| format!("invalid --fill: {}", mode))?;
        }
        if let Some(offset) = self.matches.opt_str("offset") {
            parse_offset(&offset).ok_or_else(|| format!("invalid --offset: {}", offset))?;
        }
        if let Some(name) = self.matches.opt_str("pattern") {
            if sparselife::presets::find(&name).is_none() {
                let known = sparselife::presets::names().collect::<Vec<_>>().join(", ");
                return Err(format!("unknown --pattern {}, expected one of: {}", name, known));
            }
        }
        if self.matches.opt_present("wrap") && self.matches.opt_present("unbounded") {
            return Err("--wrap and --unbounded are mutually exclusive".to_owned());
        }
        Ok(())
    }

    fn width(&self) -> Option<i32> {
        self.matches.opt_get("width").ok().flatten()
    }
    fn height(&self) -> Option<i32> {
        self.matches.opt_get("height").ok().flatten()
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }
    pub fn paused(&self) -> bool {
        self.matches.opt_present("paused")
    }

    pub fn generations(&self) -> usize {
        // kinda hacky way of saying "infinity"
        self.matches
            .opt_get("gens")
            .ok()
            .flatten()
            .unwrap_or(usize::MAX)
    }
    pub fn sleep(&self) -> Option<Duration> {
        match self.matches.opt_get("sleep").ok().flatten() {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(Duration::from_millis(100)),
            None => None,
        }
    }

    pub fn grid_size(&self) -> (i32, i32) {
        let default = match crossterm::terminal::size() {
            Ok((cols, rows)) if self.console() => (cols as i32, rows as i32 - 1),
            _ => (500, 500),
        };

        (
            self.width().unwrap_or(default.0),
            self.height().unwrap_or(default.1),
        )
    }
    pub fn topology(&self) -> Topology {
        let (rows, cols) = self.grid_size();
        if self.matches.opt_present("unbounded") {
            Topology::Unbounded
        } else if self.matches.opt_present("wrap") {
            Topology::Torus { rows, cols }
        } else {
            Topology::Bounded { rows, cols }
        }
    }
    pub fn fill_mode(&self) -> FillMode {
        self.matches
            .opt_str("fill")
            .and_then(FillMode::new)
            .unwrap_or(FillMode::Random)
    }
    pub fn offset(&self) -> Pos2 {
        self.matches
            .opt_str("offset")
            .and_then(|s| parse_offset(&s))
            .unwrap_or_default()
    }
    pub fn preset(&self) -> Option<String> {
        self.matches.opt_str("pattern")
    }

    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    fn fill_cell<R: rand::Rng>(&self, cell: Pos2, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }
    pub fn create_pattern(self, w: i32, h: i32) -> Pattern {
        if self == Self::Empty {
            return Pattern::default();
        }

        let mut rng = rand::rng();
        (0..h)
            .flat_map(|y| (0..w).map(move |x| Pos2 { x, y }))
            .filter(|&cell| self.fill_cell(cell, &mut rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparselife::CellContainer;

    fn args(argv: &[&str]) -> Args {
        Args::new(argv).expect("valid args")
    }

    fn pattern(cells: &[(i32, i32)]) -> Pattern {
        cells.iter().copied().map(Pos2::from).collect()
    }

    #[test]
    fn fill_mode_parses() {
        let args = args(&["--fill", "alternating"]);

        assert_eq!(args.fill_mode(), FillMode::Alternating);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::new(&["--fill", "sparse"]).is_err());
        assert!(Args::new(&["--gens", "-4"]).is_err());
        assert!(Args::new(&["--offset", "3"]).is_err());
        assert!(Args::new(&["--pattern", "spaceship"]).is_err());
        assert!(Args::new(&["--wrap", "--unbounded"]).is_err());
        assert!(Args::new(&["--help"]).is_err());
    }

    #[test]
    fn topology_from_flags() {
        assert_eq!(
            args(&["-w", "30", "-h", "20"]).topology(),
            Topology::Bounded { rows: 30, cols: 20 }
        );
        assert_eq!(
            args(&["-w", "30", "-h", "20", "--wrap"]).topology(),
            Topology::Torus { rows: 30, cols: 20 }
        );
        assert_eq!(args(&["--unbounded"]).topology(), Topology::Unbounded);
    }

    #[test]
    fn offset_and_preset() {
        let args = args(&["--pattern", "glider", "--offset", "4, -2"]);

        assert_eq!(args.preset().as_deref(), Some("glider"));
        assert_eq!(args.offset(), Pos2 { x: 4, y: -2 });
        assert_eq!(args.generations(), usize::MAX);
        assert_eq!(args.sleep(), None);
    }

    #[test]
    fn create_all_fills_grid() {
        let alive = FillMode::All.create_pattern(3, 2);

        assert_eq!(alive, pattern(&[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]));
    }

    #[test]
    fn create_empty_is_empty() {
        assert!(FillMode::Empty.create_pattern(5, 4).is_empty());
    }

    #[test]
    fn create_alternating_uses_parity() {
        let alive = FillMode::Alternating.create_pattern(3, 3);

        assert_eq!(alive, pattern(&[(0, 0), (2, 0), (1, 1), (0, 2), (2, 2)]));
    }

    #[test]
    fn create_random_is_within_bounds() {
        let (w, h) = (4, 3);
        let alive = FillMode::Random.create_pattern(w, h);

        assert!(alive.iter().all(|p| p.x >= 0 && p.y >= 0 && p.x < w && p.y < h));
        assert!(alive.population() <= 12);
    }
}
