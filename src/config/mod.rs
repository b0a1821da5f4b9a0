pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{AddTarget, Cli, Command, GetTarget, ModifyArgs, OutputFormat};

#[cfg(feature = "cli")]
mod cli {
    use crate::core::fingerprint::Fingerprint;
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
    use clap::{Args, Parser, Subcommand, ValueEnum};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "mta-tool")]
    #[command(about = "Concurrency-safe editing of MTA deployment descriptors", version)]
    pub struct Cli {
        /// Path to a TOML configuration file
        #[arg(long, global = true)]
        pub config: Option<PathBuf>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        /// Log output format, overriding the configuration file
        #[arg(long, global = true, value_enum)]
        pub log_format: Option<LogFormat>,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Create a new MTA descriptor from a JSON description
        Create {
            #[arg(short, long)]
            path: PathBuf,
            #[arg(short, long, help = "data in JSON format")]
            data: String,
        },
        /// Append a module or resource
        #[command(subcommand)]
        Add(AddTarget),
        /// Replace an existing module or resource with the same name
        #[command(subcommand)]
        Update(AddTarget),
        /// Print the modules or resources of a descriptor
        #[command(subcommand)]
        Get(GetTarget),
        /// Print the hashcode of a descriptor for later modifications
        Hash {
            #[arg(short, long)]
            path: PathBuf,
        },
        Copy {
            #[arg(short, long)]
            source: PathBuf,
            #[arg(short, long)]
            target: PathBuf,
        },
        Delete {
            #[arg(short, long)]
            path: PathBuf,
        },
        /// Report names shared by modules, provided services and resources
        Validate {
            #[arg(short, long)]
            path: PathBuf,
        },
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum AddTarget {
        Module(ModifyArgs),
        Resource(ModifyArgs),
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum GetTarget {
        Modules {
            #[arg(short, long)]
            path: PathBuf,
            #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
            format: OutputFormat,
        },
        Resources {
            #[arg(short, long)]
            path: PathBuf,
            #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
            format: OutputFormat,
        },
    }

    #[derive(Debug, Clone, Args)]
    pub struct ModifyArgs {
        /// the path to the yaml file
        #[arg(short, long)]
        pub path: PathBuf,

        #[arg(short, long, help = "data in JSON format")]
        pub data: String,

        /// hashcode printed by `hash` when the descriptor was read
        #[arg(short = 'c', long, default_value = "0")]
        pub hashcode: Fingerprint,

        /// Apply the change even if the descriptor changed since `hashcode` was taken
        #[arg(long)]
        pub skip_check: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum OutputFormat {
        Yaml,
        Json,
    }

    impl Validate for ModifyArgs {
        fn validate(&self) -> Result<()> {
            validate_path("path", &self.path.to_string_lossy())?;
            validate_non_empty_string("data", &self.data)
        }
    }

    impl Validate for Cli {
        fn validate(&self) -> Result<()> {
            match &self.command {
                Command::Create { path, data } => {
                    validate_path("path", &path.to_string_lossy())?;
                    validate_non_empty_string("data", data)
                }
                Command::Add(target) | Command::Update(target) => match target {
                    AddTarget::Module(args) | AddTarget::Resource(args) => args.validate(),
                },
                Command::Get(GetTarget::Modules { path, .. })
                | Command::Get(GetTarget::Resources { path, .. })
                | Command::Hash { path }
                | Command::Delete { path }
                | Command::Validate { path } => validate_path("path", &path.to_string_lossy()),
                Command::Copy { source, target } => {
                    validate_path("source", &source.to_string_lossy())?;
                    validate_path("target", &target.to_string_lossy())
                }
            }
        }
    }

}
