use plurality::{Context, PluralError, SelectionVerbose};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    /// Wraps text in escape codes only when color is enabled.
    pub struct Palette(bool);

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Palette(enabled)
        }

        fn wrap(&self, code: &str, text: &str) -> String {
            if self.0 { format!("{code}{text}{RESET}") } else { text.to_string() }
        }

        pub fn paint(&self, text: impl AsRef<str>, color: &str) -> String {
            self.wrap(color, text.as_ref())
        }

        pub fn bold(&self, text: impl AsRef<str>) -> String {
            self.wrap(BOLD, text.as_ref())
        }

        pub fn dim(&self, text: impl AsRef<str>) -> String {
            self.wrap(DIM, text.as_ref())
        }
    }
}

pub fn print_selection(input: &str, context: &Context, res: &SelectionVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let header = format!("⚙  Selecting: \"{}\"  ({} {})", input, context.culture, context.category);
    println!("\n{}", palette.bold(palette.paint(header, ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Operands ━━━", ansi::GRAY));
    let operands: Vec<String> = res
        .details
        .operands
        .iter()
        .map(|(name, value)| format!("{} {}", palette.paint(*name, ansi::BLUE), palette.dim(format!("= {value}"))))
        .collect();
    println!("  {}", operands.join("  "));

    println!("\n{}", palette.paint("━━━ Cases ━━━", ansi::GRAY));
    if res.cases.is_empty() {
        println!("{}", palette.dim("  No case matched"));
        println!("\n{}", palette.paint("Likely causes:", ansi::YELLOW));
        println!("  • The rule set has no rules for this culture and category");
        println!("  • The rule set has no catch-all (other) case");
        println!("\n{}", palette.dim("  Tip: pass --debug to see resolution details"));
    } else {
        print_cases(res, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Number: {}  │  Resolve: {}  │  Evaluate: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.dim(format!("{:?}", res.details.number)),
        palette.dim(format!("{:?}", res.details.resolve)),
        palette.paint(format!("{:?}", res.details.evaluate), ansi::CYAN),
    );
    println!();
}

fn print_cases(res: &SelectionVerbose, palette: &ansi::Palette) {
    let last = res.cases.len() - 1;
    for (idx, (case, rule)) in res.cases.iter().zip(&res.details.rules).enumerate() {
        let kind = if idx == last { "mandatory" } else { "optional" };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("#{idx}"), ansi::GRAY),
            palette.bold(palette.paint(case, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(kind, ansi::YELLOW),
        );
        println!("      {} {}", palette.dim("rule:"), palette.paint(rule, ansi::CYAN));
    }
    println!(
        "  {} {}  {} {}",
        palette.dim("rule set:"),
        palette.paint(&res.details.rule_set, ansi::BLUE),
        palette.dim("│ optional cases:"),
        palette.paint(res.details.optional_cases.to_string(), ansi::BLUE),
    );
}

pub fn print_error(input: &str, err: &PluralError, color: bool) {
    let palette = ansi::Palette::new(color);
    eprintln!("{} {}", palette.bold(palette.paint(format!("✗ \"{input}\":"), ansi::RED)), err);
}
