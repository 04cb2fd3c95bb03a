//! # Slug Subcommand
//!
//! Prints the identifier the directory would derive from a display name.

use anyhow::Result;
use clap::Args;

use bbc_core::Identifier;

/// Arguments for the `bbc slug` subcommand.
#[derive(Args, Debug)]
pub struct SlugArgs {
    /// Display name. Multiple words are joined with spaces.
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// Execute the slug subcommand. Exits 1 when nothing derivable remains.
pub fn run_slug(args: &SlugArgs) -> Result<u8> {
    let id = slug(&args.text);
    if id.is_empty() {
        tracing::error!(input = %args.text.join(" "), "no identifier can be derived");
        return Ok(1);
    }
    println!("{id}");
    Ok(0)
}

fn slug(words: &[String]) -> Identifier {
    Identifier::derive(&words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn joins_words() {
        assert_eq!(slug(&words(&["Fake", "App!"])).as_str(), "fake-app");
        assert_eq!(slug(&words(&["  Multi   Word--Org "])).as_str(), "multi-word-org");
    }

    #[test]
    fn punctuation_only_is_rejected() {
        let args = SlugArgs { text: words(&["!!!"]) };
        assert_eq!(run_slug(&args).unwrap(), 1);
    }
}
