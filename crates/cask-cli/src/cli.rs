use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cask",
    about = "Cask — versioned, integrity-verified file containers",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new cask file from text contents
    Create(CreateArgs),
    /// Print header, metadata, and content listing
    Inspect(InspectArgs),
    /// Verify whole-file and per-content integrity
    Verify(VerifyArgs),
    /// Update an existing cask file with new contents
    Update(UpdateArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// Target .dbf path
    pub path: String,
    #[arg(short, long, default_value = "anonymous")]
    pub author: String,
    /// Text contents as name=value pairs
    #[arg(short, long)]
    pub text: Vec<String>,
    /// Compress each content payload
    #[arg(short, long)]
    pub compress: bool,
    /// Use the compact binary wire format instead of JSON
    #[arg(long)]
    pub binary: bool,
    /// Declare a version label for the file
    #[arg(long)]
    pub version_label: Option<String>,
}

#[derive(Args)]
pub struct InspectArgs {
    pub path: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub path: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub path: String,
    /// Text contents to add, as name=value pairs
    #[arg(short, long)]
    pub text: Vec<String>,
    /// Compress the added payloads
    #[arg(short, long)]
    pub compress: bool,
    /// Use delta encoding instead of a full rewrite
    #[arg(long)]
    pub delta: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create() {
        let cli = Cli::try_parse_from([
            "cask", "create", "out.dbf", "-a", "John Doe", "-t", "greeting=hello",
        ])
        .unwrap();
        if let Command::Create(args) = cli.command {
            assert_eq!(args.path, "out.dbf");
            assert_eq!(args.author, "John Doe");
            assert_eq!(args.text, vec!["greeting=hello"]);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_create_binary_compressed() {
        let cli = Cli::try_parse_from([
            "cask", "create", "out.dbf", "--binary", "--compress", "-t", "a=b",
        ])
        .unwrap();
        if let Command::Create(args) = cli.command {
            assert!(args.binary);
            assert!(args.compress);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_inspect() {
        let cli = Cli::try_parse_from(["cask", "inspect", "file.dbf"]).unwrap();
        assert!(matches!(cli.command, Command::Inspect(_)));
    }

    #[test]
    fn parse_verify() {
        let cli = Cli::try_parse_from(["cask", "verify", "file.dbf"]).unwrap();
        assert!(matches!(cli.command, Command::Verify(_)));
    }

    #[test]
    fn parse_update_delta() {
        let cli =
            Cli::try_parse_from(["cask", "update", "file.dbf", "--delta", "-t", "x=y"]).unwrap();
        if let Command::Update(args) = cli.command {
            assert!(args.delta);
            assert_eq!(args.text, vec!["x=y"]);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["cask", "--verbose", "verify", "f.dbf"]).unwrap();
        assert!(cli.verbose);
    }
}
