use stylet::{ExpandResult, MatchOutcome};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, result: &ExpandResult, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Expanding: \"{}\"", input), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Resolution ━━━", ansi::GRAY));
    if result.details.traces.is_empty() {
        println!("{}", palette.dim("  No tokens resolved"));
    } else {
        print_traces(result, &palette);
    }

    println!("\n{}", palette.paint("━━━ Output ━━━", ansi::GRAY));
    if result.text.is_empty() {
        println!("{}", palette.dim("  (empty)"));
    } else {
        for line in result.text.lines() {
            println!("  {}", palette.bold(palette.paint(line, ansi::GREEN)));
        }
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Parse: {}  │  Resolve: {}  │  Render: {}",
        palette.paint(format!("{:?}", result.elapsed), ansi::GREEN),
        palette.dim(format!("{:?}", result.details.parse)),
        palette.paint(format!("{:?}", result.details.resolve), ansi::CYAN),
        palette.dim(format!("{:?}", result.details.render)),
    );
    println!("\n{}", palette.dim("  Tip: Set STYLET_DEBUG_RESOLVE=1 to see per-node match decisions"));
    println!();
}

fn print_traces(result: &ExpandResult, palette: &ansi::Palette) {
    for (idx, trace) in result.details.traces.iter().enumerate() {
        let (label, color) = match trace.outcome {
            MatchOutcome::Property => ("property", ansi::GREEN),
            MatchOutcome::Snippet => ("snippet", ansi::CYAN),
            MatchOutcome::Keyword => ("keyword", ansi::BLUE),
            MatchOutcome::Unmatched => ("unmatched", ansi::YELLOW),
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(&trace.input, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(label, color),
        );
        match &trace.matched {
            Some(matched) => println!(
                "      {} {}  {} {}",
                palette.dim("matched:"),
                palette.paint(matched, ansi::BLUE),
                palette.dim("│ score:"),
                palette.paint(format!("{:.3}", trace.score), ansi::CYAN)
            ),
            None => println!("      {}", palette.dim("matched: none, passed through")),
        }
    }
}
