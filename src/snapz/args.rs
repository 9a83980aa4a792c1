use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "snapz")]
#[command(about = "Tags, searches, and documents timestamped screenshots", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the latest n documents
    #[command(alias = "ls")]
    List {
        /// How many documents to print
        #[arg(value_parser = clap::value_parser!(u32).range(1..=100))]
        n: Option<u32>,
    },

    /// Prints either the latest document or the one with the given id
    Get {
        /// Document id, full or shorthand (e.g. 143-527 for today)
        id: Option<String>,

        /// Select the most recent document
        #[arg(long)]
        latest: bool,
    },

    /// Deprecated; use "get --latest"
    Latest,

    /// Deprecated; use "get --latest"
    Last,

    /// Prints every document matched by the search expression
    Search {
        /// Search expression, e.g. color:red + starred - archived
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Applies a modification line to a document's tags
    Tag {
        /// Document id, full or shorthand
        id: String,

        /// Modification line, e.g. color:=blue starred -draft
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        modification: Vec<String>,

        /// Print the would-be result without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Deprecated; use "tag" with -name operations
    Untag {
        /// Document id, full or shorthand
        id: String,

        /// Tag names to remove
        #[arg(required = true, num_args = 1..)]
        tag_names: Vec<String>,
    },

    /// Opens an editor to modify the description of a document
    Describe {
        /// Document id, full or shorthand
        id: Option<String>,

        /// Select the most recent document
        #[arg(long)]
        latest: bool,
    },

    /// Opens an editor to document primary or secondary index entries
    Document {
        /// Secondary tag name; omit to document the primary index
        tag_name: Option<String>,
    },

    /// Prints all indexed tag names, optionally with their values
    Index {
        /// Tag names to print values for
        tag_names: Vec<String>,
    },

    /// Rebuilds both indexes from the documents
    #[command(name = "rebuild-index")]
    RebuildIndex,

    /// Archives pictures and metadata into the "backup" folder
    Backup,
}
