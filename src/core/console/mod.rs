//! Interactive admin console.
//!
//! Drives the catalog controllers from a line-oriented terminal: the list
//! view, the create/edit form and the delete confirmation.

mod command;
mod table;
mod terminal;

pub use command::{Command, HELP};
pub use table::render as render_table;
pub use terminal::Terminal;

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, info};

use crate::core::Result;
use crate::domains::catalog::{
    Confirm, DeleteOutcome, FormField, ProductApi, ProductFormController, ProductId,
    ProductListController,
};

/// Input that clears a field while editing.
const CLEAR_FIELD: &str = "-";

/// The console session.
pub struct Console<R, W> {
    terminal: Terminal<R, W>,
    list: ProductListController,
    form: ProductFormController,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(api: Arc<dyn ProductApi>, reader: R, writer: W) -> Self {
        Self {
            terminal: Terminal::new(reader, writer),
            list: ProductListController::new(api.clone()),
            form: ProductFormController::new(api),
        }
    }

    /// Run commands until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        self.terminal.write(HELP).await?;
        self.show_list().await?;

        while let Some(line) = self.terminal.prompt("> ").await? {
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    self.terminal.line(&message).await?;
                    continue;
                }
            };
            debug!(?command, "Console command");

            match command {
                Command::List => self.show_list().await?,
                Command::New => self.edit_form(None).await?,
                Command::Edit(id) => self.edit_form(Some(id)).await?,
                Command::Delete(id) => self.delete(id).await?,
                Command::Help => self.terminal.write(HELP).await?,
                Command::Nothing => {}
                Command::Quit => break,
            }
        }

        info!("Console session ended");
        Ok(())
    }

    /// Hand back the terminal streams.
    pub fn into_inner(self) -> (R, W) {
        self.terminal.into_inner()
    }

    async fn show_list(&mut self) -> Result<()> {
        // A failed load is recorded by the controller and shown below.
        let _ = self.list.load().await;

        self.terminal.line("Products").await?;
        if let Some(message) = self.list.error() {
            let message = format!("Error: {}", message);
            self.terminal.line(&message).await?;
        }
        let table = render_table(&self.list.rows());
        self.terminal.write(&table).await?;
        Ok(())
    }

    async fn edit_form(&mut self, id: Option<ProductId>) -> Result<()> {
        if id.is_some() {
            self.terminal.line("Loading...").await?;
        }
        if self.form.load(id).await.is_err() {
            let message = self.form.error().unwrap_or_default();
            self.terminal.line(&format!("Error: {}", message)).await?;
            return Ok(());
        }

        let title = self.form.title();
        self.terminal.line(title).await?;
        self.terminal
            .line("Press enter to keep a value, '-' to clear it.")
            .await?;

        loop {
            for field in FormField::ALL {
                let current = self.form.field(field);
                let prompt = format!("{} [{}]: ", field.label(), current);
                let Some(input) = self.terminal.prompt(&prompt).await? else {
                    return Ok(());
                };
                match input.trim() {
                    "" => {}
                    CLEAR_FIELD => self.form.set_field(field, ""),
                    text => self.form.set_field(field, text),
                }
            }

            let label = self.form.submit_label();
            self.terminal.line(&format!("[{}]", label)).await?;
            self.terminal.line("Saving...").await?;

            match self.form.submit().await {
                Ok(_) => {
                    self.terminal.line("Product saved.").await?;
                    return self.show_list().await;
                }
                Err(err) => {
                    let message = self.form.error().unwrap_or_else(|| err.user_message());
                    self.terminal.line(&format!("Error: {}", message)).await?;
                    if !err.is_validation() && !self.terminal.confirm("Try again?").await {
                        return Ok(());
                    }
                }
            }
        }
    }

    async fn delete(&mut self, id: ProductId) -> Result<()> {
        let message = match self.list.delete(id, &mut self.terminal).await {
            Ok(DeleteOutcome::Deleted) => format!("Product {} deleted.", id),
            Ok(DeleteOutcome::Cancelled) => "Cancelled.".to_string(),
            Err(err) => self
                .list
                .alert()
                .map(str::to_string)
                .unwrap_or_else(|| err.user_message()),
        };
        self.terminal.line(&message).await?;
        Ok(())
    }
}
