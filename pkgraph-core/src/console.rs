use std::env;
use std::path::Path;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy)]
enum Tone {
    Dim,
    Green,
    Cyan,
    Yellow,
    Red,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Dim => "2",
            Tone::Green => "32",
            Tone::Cyan => "36",
            Tone::Yellow => "33",
            Tone::Red => "31",
        }
    }

    fn paint(self, text: &str) -> String {
        static USE_COLOR: OnceLock<bool> = OnceLock::new();

        if *USE_COLOR.get_or_init(|| env::var_os("NO_COLOR").is_none()) {
            format!("\u{1b}[{}m{}\u{1b}[0m", self.code(), text)
        } else {
            text.to_string()
        }
    }
}

pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn header(command: &str, version: &str) {
    eprintln!("{}", Tone::Dim.paint(&format!("pkgraph {} v{}", command, version)));
    eprintln!();
}

pub fn step(message: &str) {
    eprintln!("{}", Tone::Dim.paint(message));
}

pub fn verbose(message: &str) {
    if is_verbose() {
        eprintln!("{} {}", Tone::Dim.paint("verbose"), Tone::Dim.paint(message));
    }
}

pub fn scope(label: &str, nodes: usize, links: usize, max_level: usize) {
    let noun = if nodes == 1 { "package" } else { "packages" };
    println!(
        "{} {} {} {}",
        Tone::Cyan.paint(&format!("{:<5}", label)),
        nodes,
        noun,
        Tone::Dim.paint(&format!("({} links, max level {})", links, max_level))
    );
}

pub fn written(path: &Path) {
    println!("{} {}", Tone::Green.paint("+"), path.display());
}

pub fn warn(message: &str) {
    let tag = Tone::Yellow.paint("warn");
    eprintln!("{} {}", tag, message);
}

pub fn error(message: &str) {
    let tag = Tone::Red.paint("error");
    eprintln!("{} {}", tag, message);
}

pub fn info(message: &str) {
    println!("{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painting_wraps_message_in_tone_code() {
        let painted = Tone::Green.paint("+");

        assert!(painted == "+" || painted == "\u{1b}[32m+\u{1b}[0m");
        assert_eq!(Tone::Red.code(), "31");
    }
}
