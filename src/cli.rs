use clap::Parser;

/// Export Figma styles as JSON, CSS and Sass design tokens.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "figma-tokens", version, about)]
pub struct Cli {
    /// Keep running and re-check the file on the configured interval
    #[arg(short, long)]
    pub watch: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_flag_forms() {
        assert!(!Cli::parse_from(["figma-tokens"]).watch);
        assert!(Cli::parse_from(["figma-tokens", "--watch"]).watch);
        assert!(Cli::parse_from(["figma-tokens", "-w"]).watch);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["figma-tokens", "--interval", "5"]).is_err());
    }
}
