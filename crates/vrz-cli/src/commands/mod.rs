pub mod add;
pub mod cat_file;
pub mod check_ignore;
pub mod checkout;
pub mod commit;
pub mod hash_object;
pub mod init;
pub mod log;
pub mod ls_files;
pub mod ls_tree;
pub mod rev_parse;
pub mod rm;
pub mod show_ref;
pub mod status;
pub mod tag;

use anyhow::Result;
use clap::Subcommand;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new, empty repo
    Init(init::InitArgs),
    /// Add file contents to the index
    Add(add::AddArgs),
    /// Remove files from the working tree and the index
    Rm(rm::RmArgs),
    /// Record changes to the repository
    Commit(commit::CommitArgs),
    /// Show the working tree status
    Status(status::StatusArgs),
    /// Display the history of a given commit
    Log(log::LogArgs),
    /// Pretty-print a tree object
    LsTree(ls_tree::LsTreeArgs),
    /// List all the staged files
    LsFiles(ls_files::LsFilesArgs),
    /// Checkout a commit inside of a directory
    Checkout(checkout::CheckoutArgs),
    /// Provide contents of repository objects
    #[command(name = "cat-file")]
    CatFile(cat_file::CatFileArgs),
    /// Compute the object ID and optionally create a blob from a file
    #[command(name = "hash-object")]
    HashObject(hash_object::HashObjectArgs),
    /// Parse revision (or other object) identifiers
    #[command(name = "rev-parse")]
    RevParse(rev_parse::RevParseArgs),
    /// List references in the repository
    #[command(name = "show-ref")]
    ShowRef(show_ref::ShowRefArgs),
    /// List and create tags
    Tag(tag::TagArgs),
    /// Check path(s) against ignore rules
    #[command(name = "check-ignore")]
    CheckIgnore(check_ignore::CheckIgnoreArgs),
}

/// Open the repository rooted above the current directory. There is no
/// `--git-dir` override: discovery always walks up from `.`.
pub fn open_repo() -> Result<vrz_repository::Repository> {
    Ok(vrz_repository::Repository::discover(".")?)
}

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init(args) => init::run(args),
        Commands::Add(args) => add::run(args),
        Commands::Rm(args) => rm::run(args),
        Commands::Commit(args) => commit::run(args),
        Commands::Status(args) => status::run(args),
        Commands::Log(args) => log::run(args),
        Commands::LsTree(args) => ls_tree::run(args),
        Commands::LsFiles(args) => ls_files::run(args),
        Commands::Checkout(args) => checkout::run(args),
        Commands::CatFile(args) => cat_file::run(args),
        Commands::HashObject(args) => hash_object::run(args),
        Commands::RevParse(args) => rev_parse::run(args),
        Commands::ShowRef(args) => show_ref::run(args),
        Commands::Tag(args) => tag::run(args),
        Commands::CheckIgnore(args) => check_ignore::run(args),
    }
}
