use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "splitdiff",
    version,
    about = "Side-by-side terminal viewer for two text files"
)]
pub struct Cli {
    /// Left-hand file. Given together with RIGHT, opens the diff view directly
    #[arg(requires = "right")]
    pub left: Option<PathBuf>,

    /// Right-hand file
    #[arg(requires = "left")]
    pub right: Option<PathBuf>,

    /// Config file to use instead of ~/.config/splitdiff/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Color theme (classic, one-dark, mono)
    #[arg(long)]
    pub theme: Option<String>,

    /// Start with matching-row highlighting turned off
    #[arg(long)]
    pub no_highlight: bool,

    /// Write the log here instead of ~/.cache/splitdiff/splitdiff.log
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Both files, when they were given on the command line.
    pub fn files(&self) -> Option<(PathBuf, PathBuf)> {
        self.left.clone().zip(self.right.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_menu_mode() {
        let cli = Cli::try_parse_from(["splitdiff"]).unwrap();
        assert!(cli.files().is_none());
        assert!(!cli.no_highlight);
    }

    #[test]
    fn test_two_files() {
        let cli = Cli::try_parse_from(["splitdiff", "a.txt", "b.txt"]).unwrap();
        assert_eq!(
            cli.files(),
            Some((PathBuf::from("a.txt"), PathBuf::from("b.txt")))
        );
    }

    #[test]
    fn test_single_file_is_rejected() {
        assert!(Cli::try_parse_from(["splitdiff", "a.txt"]).is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "splitdiff",
            "--theme",
            "mono",
            "--no-highlight",
            "--config",
            "/etc/sd.toml",
        ])
        .unwrap();
        assert_eq!(cli.theme.as_deref(), Some("mono"));
        assert!(cli.no_highlight);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/sd.toml")));
    }
}
