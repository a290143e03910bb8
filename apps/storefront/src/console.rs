//! # Console
//!
//! Line-oriented front end for the `kirana` binary. Each line maps to one
//! UI control:
//!
//! ```text
//! add <id>    "Add to Cart" on a product card
//! inc <id>    "+" on a cart line
//! dec <id>    "-" on a cart line
//! rm <id>     "Remove" on a cart line
//! toggle      cart icon
//! cart        print the cart
//! catalog     print the product list
//! reload      load the catalog again
//! help
//! quit
//! ```

use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, warn};

use kirana_core::ProductId;

use crate::commands;
use crate::error::ApiError;
use crate::render::{format_cart, format_catalog};
use crate::Storefront;

const HELP: &str = "commands: add <id> | inc <id> | dec <id> | rm <id> | toggle | cart | catalog | reload | help | quit";

/// One parsed console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    Toggle,
    Cart,
    Catalog,
    Reload,
    Help,
    Quit,
}

/// A console line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseCommandError(String);

impl FromStr for ConsoleCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| ParseCommandError("empty command".to_string()))?
            .to_lowercase();

        let mut id = || -> Result<ProductId, ParseCommandError> {
            let raw = parts
                .next()
                .ok_or_else(|| ParseCommandError(format!("{} needs a product id", verb)))?;
            raw.parse()
                .map_err(|_| ParseCommandError(format!("not a product id: {}", raw)))
        };

        let command = match verb.as_str() {
            "add" => ConsoleCommand::Add(id()?),
            "inc" | "+" => ConsoleCommand::Increase(id()?),
            "dec" | "-" => ConsoleCommand::Decrease(id()?),
            "rm" | "remove" => ConsoleCommand::Remove(id()?),
            "toggle" => ConsoleCommand::Toggle,
            "cart" => ConsoleCommand::Cart,
            "catalog" | "ls" => ConsoleCommand::Catalog,
            "reload" => ConsoleCommand::Reload,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" | "q" => ConsoleCommand::Quit,
            other => return Err(ParseCommandError(format!("unknown command: {}", other))),
        };
        Ok(command)
    }
}

impl ConsoleCommand {
    /// Runs the command. Returns text to print, if any beyond what the
    /// renderers already printed.
    pub async fn execute(self, shop: &Storefront) -> Result<Option<String>, ApiError> {
        let text = match self {
            ConsoleCommand::Add(id) => {
                commands::add_to_cart(shop, id)?;
                None
            }
            ConsoleCommand::Increase(id) => {
                commands::increase_quantity(shop, id)?;
                None
            }
            ConsoleCommand::Decrease(id) => {
                commands::decrease_quantity(shop, id)?;
                None
            }
            ConsoleCommand::Remove(id) => {
                commands::remove_from_cart(shop, id)?;
                None
            }
            ConsoleCommand::Toggle => {
                let open = commands::toggle_cart_panel(shop);
                Some(if open { "cart opened" } else { "cart closed" }.to_string())
            }
            ConsoleCommand::Cart => Some(format_cart(&commands::get_cart(shop).view)),
            ConsoleCommand::Catalog => Some(format_catalog(&commands::get_catalog(shop))),
            ConsoleCommand::Reload => {
                commands::load_catalog(shop).await?;
                None
            }
            ConsoleCommand::Help => Some(HELP.to_string()),
            ConsoleCommand::Quit => None,
        };
        Ok(text)
    }
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Bad lines and rejected commands are reported to `output` and the loop
/// keeps going.
pub async fn run_console<R, W>(shop: &Storefront, input: R, output: &mut W) -> Result<(), ApiError>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut lines = BufReader::new(input).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read input: {}", e)))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Quit) => break,
            Ok(command) => {
                debug!(?command, "Console command");
                match command.execute(shop).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "Console command failed");
                        Some(format!("error: {}", e.message))
                    }
                }
            }
            Err(e) => Some(format!("{} ({})", e, HELP)),
        };

        if let Some(text) = reply {
            writeln!(output, "{}", text)
                .map_err(|e| ApiError::internal(format!("Failed to write output: {}", e)))?;
        }
    }

    Ok(())
}
