use clap::{Parser, ValueEnum};
use std::fmt;

#[derive(Parser, Debug, Default)]
#[command(name = "shopping-cart")]
#[command(about = "Interactive shopping cart with sequential discounts")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// What to do with a discount or detail token that cannot be parsed
    #[arg(long, value_name = "POLICY")]
    pub on_malformed: Option<MalformedPolicy>,

    /// Output format of the final cart summary
    #[arg(short, long)]
    pub format: Option<SummaryFormat>,

    /// Reject empty names, negative prices and discounts outside 0-100
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MalformedPolicy {
    /// Stop the session without printing a summary
    #[default]
    Abort,
    /// Drop the item being entered and keep going
    Skip,
}

impl fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedPolicy::Abort => write!(f, "abort"),
            MalformedPolicy::Skip => write!(f, "skip"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryFormat::Text => write!(f, "text"),
            SummaryFormat::Json => write!(f, "json"),
        }
    }
}
