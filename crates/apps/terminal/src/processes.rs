//! Full-screen terminal takeovers (`peaclock`, `pipes.sh`, `cmatrix`, `jumpscare`).
//!
//! Each process is a small deterministic animation: it owns a seeded generator, advances one step
//! per host tick and renders to plain text lines. Nothing here touches timers; the session returns
//! ticker effects and the view schedules them.

use std::time::Duration;

use platform_host::LocalClockTime;

/// Footer rendered under every process frame.
pub const EXIT_HINT: &str = "Press Ctrl+C to exit";

/// Pipes grid rows.
pub const PIPES_ROWS: usize = 20;
/// Pipes grid columns.
pub const PIPES_COLS: usize = 60;
const PIPE_COUNT: usize = 5;
const PIPE_TURN_PERCENT: u64 = 20;

const MATRIX_ROWS: usize = 20;
const MATRIX_COLS: usize = 60;
const MATRIX_GLYPHS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', '0', '1', '2', '3',
    '4', '5', '7', '8', '9', 'Z', ':', '=', '*', '+', '<', '>',
];

const CLOCK_DIGITS: [[&str; 5]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    [" ██", "  █", "  █", "  █", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];
const CLOCK_COLON: [&str; 5] = ["   ", " █ ", "   ", " █ ", "   "];

const FACE_OPEN: &[&str] = &[
    "      .-''''''-.      ",
    "    .'          '.    ",
    "   /   O      O   \\   ",
    "  :                :  ",
    "  |                |  ",
    "  :    .------.    :  ",
    "   \\  '        '  /   ",
    "    '.          .'    ",
    "      '-......-'      ",
];
const FACE_WIDE: &[&str] = &[
    "      .-''''''-.      ",
    "    .'  \\    /  '.    ",
    "   /   (@)  (@)   \\   ",
    "  :                :  ",
    "  |    ________    |  ",
    "  :   |VVVVVVVV|   :  ",
    "   \\  |AAAAAAAA|  /   ",
    "    '.          .'    ",
    "      '-......-'      ",
];

/// Seeded xorshift generator; deterministic for a given seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift64(u64);

impl XorShift64 {
    /// Creates a generator. A zero seed is replaced with a fixed non-zero constant.
    pub fn new(seed: u64) -> Self {
        Self(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform-ish value in `0..bound`; `0` when `bound` is zero.
    pub fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        (self.next_u64() % bound as u64) as usize
    }

    /// `true` with roughly `percent`% probability.
    pub fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}

/// Process started by a takeover command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessKind {
    /// `peaclock`
    Clock,
    /// `pipes.sh`
    Pipes,
    /// `cmatrix`
    Matrix,
    /// `jumpscare`
    Jumpscare,
}

impl ProcessKind {
    /// Maps a lowercased command name to a process.
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "peaclock" => Some(Self::Clock),
            "pipes.sh" => Some(Self::Pipes),
            "cmatrix" => Some(Self::Matrix),
            "jumpscare" => Some(Self::Jumpscare),
            _ => None,
        }
    }

    /// Host tick period for this animation.
    pub const fn tick_period(self) -> Duration {
        match self {
            Self::Clock => Duration::from_secs(1),
            Self::Pipes => Duration::from_millis(30),
            Self::Matrix => Duration::from_millis(50),
            Self::Jumpscare => Duration::from_millis(120),
        }
    }

    /// CSS modifier used by the view.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Clock => "process-clock",
            Self::Pipes => "process-pipes",
            Self::Matrix => "process-matrix",
            Self::Jumpscare => "process-jumpscare",
        }
    }
}

/// Renders `HH:MM:SS` as five rows of block digits.
pub fn clock_rows(time: LocalClockTime) -> Vec<String> {
    let mut rows = vec![String::new(); 5];
    for ch in time.hms().chars() {
        let art = ch
            .to_digit(10)
            .map_or(&CLOCK_COLON, |d| &CLOCK_DIGITS[d as usize]);
        for (row, segment) in rows.iter_mut().zip(art.iter()) {
            row.push_str(segment);
            row.push_str("  ");
        }
    }
    rows.iter_mut().for_each(|row| row.truncate(row.trim_end().len()));
    rows
}

/// Box-drawing glyph for a pipe heading `from` that continues `to`.
///
/// Directions: 0 up, 1 right, 2 down, 3 left.
pub fn pipe_glyph(from: u8, to: u8) -> char {
    match (from % 4, to % 4) {
        (0 | 2, 0 | 2) => '┃',
        (1 | 3, 1 | 3) => '━',
        (0, 1) | (3, 2) => '┏',
        (0, 3) | (1, 2) => '┓',
        (2, 1) | (3, 0) => '┗',
        _ => '┛',
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pipe {
    row: usize,
    col: usize,
    dir: u8,
}

/// Pipe animation grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipesField {
    grid: Vec<Vec<char>>,
    pipes: Vec<Pipe>,
    rng: XorShift64,
}

impl PipesField {
    /// Seeds a blank field with randomly placed pipes.
    pub fn new(seed: u64) -> Self {
        let mut rng = XorShift64::new(seed);
        let pipes = (0..PIPE_COUNT)
            .map(|_| Pipe {
                row: rng.below(PIPES_ROWS),
                col: rng.below(PIPES_COLS),
                dir: rng.below(4) as u8,
            })
            .collect();
        Self {
            grid: vec![vec![' '; PIPES_COLS]; PIPES_ROWS],
            pipes,
            rng,
        }
    }

    /// Draws one segment per pipe and advances each head, wrapping at the edges.
    pub fn step(&mut self) {
        for pipe in &mut self.pipes {
            let mut next = pipe.dir;
            if self.rng.chance(PIPE_TURN_PERCENT) {
                next = if self.rng.below(2) == 0 {
                    (pipe.dir + 1) % 4
                } else {
                    (pipe.dir + 3) % 4
                };
            }
            self.grid[pipe.row][pipe.col] = pipe_glyph(pipe.dir, next);
            pipe.dir = next;
            match pipe.dir {
                0 => pipe.row = (pipe.row + PIPES_ROWS - 1) % PIPES_ROWS,
                1 => pipe.col = (pipe.col + 1) % PIPES_COLS,
                2 => pipe.row = (pipe.row + 1) % PIPES_ROWS,
                _ => pipe.col = (pipe.col + PIPES_COLS - 1) % PIPES_COLS,
            }
        }
    }

    /// Grid as text rows.
    pub fn rows(&self) -> Vec<String> {
        self.grid.iter().map(|row| row.iter().collect()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RainColumn {
    head: i32,
    trail: i32,
}

/// Falling-glyph animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRain {
    grid: Vec<Vec<char>>,
    columns: Vec<RainColumn>,
    rng: XorShift64,
}

impl MatrixRain {
    /// Seeds columns with staggered start rows.
    pub fn new(seed: u64) -> Self {
        let mut rng = XorShift64::new(seed);
        let columns = (0..MATRIX_COLS)
            .map(|_| Self::fresh_column(&mut rng))
            .collect();
        Self {
            grid: vec![vec![' '; MATRIX_COLS]; MATRIX_ROWS],
            columns,
            rng,
        }
    }

    fn fresh_column(rng: &mut XorShift64) -> RainColumn {
        RainColumn {
            head: -(rng.below(MATRIX_ROWS) as i32),
            trail: 6 + rng.below(9) as i32,
        }
    }

    /// Moves every column down one row, erasing the cell that falls off its trail.
    pub fn step(&mut self) {
        let rows = MATRIX_ROWS as i32;
        for (col, column) in self.columns.iter_mut().enumerate() {
            column.head += 1;
            if (0..rows).contains(&column.head) {
                let glyph = MATRIX_GLYPHS[self.rng.below(MATRIX_GLYPHS.len())];
                self.grid[column.head as usize][col] = glyph;
            }
            let tail = column.head - column.trail;
            if (0..rows).contains(&tail) {
                self.grid[tail as usize][col] = ' ';
            }
            if tail >= rows {
                *column = Self::fresh_column(&mut self.rng);
            }
        }
    }

    /// Grid as text rows.
    pub fn rows(&self) -> Vec<String> {
        self.grid.iter().map(|row| row.iter().collect()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ProcessFrame {
    Clock(LocalClockTime),
    Pipes(PipesField),
    Matrix(MatrixRain),
    Jumpscare { ticks: u32 },
}

/// Running takeover with its animation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveProcess {
    kind: ProcessKind,
    frame: ProcessFrame,
}

impl ActiveProcess {
    /// Starts `kind`, seeding random animations with `seed`.
    pub fn start(kind: ProcessKind, seed: u64, now: LocalClockTime) -> Self {
        let frame = match kind {
            ProcessKind::Clock => ProcessFrame::Clock(now),
            ProcessKind::Pipes => ProcessFrame::Pipes(PipesField::new(seed)),
            ProcessKind::Matrix => ProcessFrame::Matrix(MatrixRain::new(seed)),
            ProcessKind::Jumpscare => ProcessFrame::Jumpscare { ticks: 0 },
        };
        Self { kind, frame }
    }

    /// Which process this is.
    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    /// Advances the animation by one host tick.
    pub fn tick(&mut self, now: LocalClockTime) {
        match &mut self.frame {
            ProcessFrame::Clock(time) => *time = now,
            ProcessFrame::Pipes(field) => field.step(),
            ProcessFrame::Matrix(rain) => rain.step(),
            ProcessFrame::Jumpscare { ticks } => *ticks = ticks.saturating_add(1),
        }
    }

    /// Whether the jumpscare is on its inverted flash frame.
    pub fn is_flashing(&self) -> bool {
        matches!(self.frame, ProcessFrame::Jumpscare { ticks } if ticks % 2 == 1)
    }

    /// Current frame as text lines, without the footer.
    pub fn lines(&self) -> Vec<String> {
        match &self.frame {
            ProcessFrame::Clock(time) => clock_rows(*time),
            ProcessFrame::Pipes(field) => field.rows(),
            ProcessFrame::Matrix(rain) => rain.rows(),
            ProcessFrame::Jumpscare { ticks } => {
                let face = if ticks % 2 == 0 { FACE_OPEN } else { FACE_WIDE };
                face.iter().map(|line| (*line).to_string()).collect()
            }
        }
    }

    /// Current frame followed by a blank line and [`EXIT_HINT`].
    pub fn frame_lines(&self) -> Vec<String> {
        let mut lines = self.lines();
        lines.push(String::new());
        lines.push(EXIT_HINT.to_string());
        lines
    }
}
