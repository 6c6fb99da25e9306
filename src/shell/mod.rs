//! # Shell
//!
//! Line-oriented front end. Reads commands, hands them to the browse
//! controller or the favorites store, and prints the rendered result.
//!
//! This is the only module that writes to the terminal. The core types never
//! print; failures reach this layer as a `FailureKind` and are turned into
//! copy by [`render::failure`].

pub mod command;
pub mod render;

use std::collections::HashMap;
use std::io::{self, Write};

use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::catalog::{CatalogItemDetail, CatalogItemSummary};
use crate::core::{BrowseController, FavoritesStore};
use command::{HELP, ShellCommand};
use render::Operation;

const WRAP_WIDTH: usize = 72;

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W: Write> {
    controller: BrowseController,
    favorites: FavoritesStore,
    /// Details fetched this session, keyed by remote id.
    seen: HashMap<u32, CatalogItemDetail>,
    /// List number -> remote id, for summaries whose detail has been fetched.
    resolved: HashMap<u32, u32>,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(controller: BrowseController, favorites: FavoritesStore, out: W) -> Self {
        Self {
            controller,
            favorites,
            seen: HashMap::new(),
            resolved: HashMap::new(),
            out,
        }
    }

    pub fn controller(&self) -> &BrowseController {
        &self.controller
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Loads the first page, then executes commands until `quit` or EOF.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> io::Result<()> {
        self.execute(ShellCommand::Reload).await?;
        writeln!(self.out, "Type 'help' for commands.")?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                info!("Input closed, leaving shell");
                break;
            };

            match command::parse(&line) {
                Ok(cmd) => {
                    debug!("Command: {:?}", cmd);
                    if self.execute(cmd).await? == Flow::Quit {
                        break;
                    }
                }
                Err(command::ParseError::Empty) => {}
                Err(e) => writeln!(self.out, "{e}")?,
            }
        }
        Ok(())
    }

    pub async fn execute(&mut self, cmd: ShellCommand) -> io::Result<Flow> {
        match cmd {
            ShellCommand::More => self.load(false).await?,
            ShellCommand::Reload => {
                self.controller.reset();
                self.resolved.clear();
                self.load(true).await?;
            }
            ShellCommand::Reset => {
                self.controller.reset();
                self.resolved.clear();
                writeln!(self.out, "List cleared.")?;
            }
            ShellCommand::List => self.print_list()?,
            ShellCommand::Search(query) => match self.controller.search(&query).await {
                Ok(found) => {
                    self.print_detail(&found)?;
                    self.seen.insert(found.id, found);
                }
                Err(kind) => writeln!(self.out, "{}", render::failure(Operation::Search, kind))?,
            },
            ShellCommand::Show(id) => {
                if let Some(found) = self.detail_for(id).await? {
                    self.print_detail(&found)?;
                }
            }
            ShellCommand::Favorite(id) => {
                if let Some(found) = self.detail_for(id).await? {
                    let name = found.name.clone();
                    if self.favorites.toggle(found) {
                        writeln!(self.out, "Added {name} to favorites.")?;
                    } else {
                        writeln!(self.out, "Removed {name} from favorites.")?;
                    }
                }
            }
            ShellCommand::Favorites => {
                writeln!(self.out, "{}", render::favorites(self.favorites.items()))?;
            }
            ShellCommand::ClearFavorites => {
                let count = self.favorites.len();
                self.favorites.clear();
                writeln!(self.out, "Cleared {count} favorites.")?;
            }
            ShellCommand::Help => writeln!(self.out, "{HELP}")?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn load(&mut self, reset: bool) -> io::Result<()> {
        if !reset && self.controller.is_exhausted() {
            writeln!(self.out, "End of catalog.")?;
            return Ok(());
        }
        match self.controller.load_page(reset).await {
            Ok(0) => writeln!(self.out, "End of catalog.")?,
            Ok(added) => {
                let start = self.controller.items().len() - added;
                let text = render::summaries(&self.controller.items()[start..], |item| {
                    self.is_favorite(item)
                });
                writeln!(self.out, "{text}")?;
            }
            Err(kind) => writeln!(self.out, "{}", render::failure(Operation::Load, kind))?,
        }
        Ok(())
    }

    /// Whether a list entry is a favorite. Entries whose detail has not been
    /// fetched yet are matched by name.
    fn is_favorite(&self, item: &CatalogItemSummary) -> bool {
        match self.resolved.get(&item.id) {
            Some(remote_id) => self.favorites.contains(*remote_id),
            None => self.favorites.items().iter().any(|fav| fav.name == item.name),
        }
    }

    /// Resolves a number to a detail. A loaded list entry wins; otherwise
    /// the number is taken as the remote id of an earlier search result.
    /// Prints the reason and returns `None` when neither works.
    async fn detail_for(&mut self, id: u32) -> io::Result<Option<CatalogItemDetail>> {
        if let Some(found) = self.resolved.get(&id).and_then(|remote| self.seen.get(remote)) {
            return Ok(Some(found.clone()));
        }

        let Some(summary) = self.controller.find(id).cloned() else {
            if let Some(found) = self.seen.get(&id) {
                return Ok(Some(found.clone()));
            }
            writeln!(
                self.out,
                "Entry #{id} is not loaded. Use 'more' or 'search {id}'."
            )?;
            return Ok(None);
        };

        match self.controller.fetch_detail(&summary).await {
            Ok(found) => {
                if found.id != id {
                    debug!("List entry #{id} is remote id {}", found.id);
                }
                self.resolved.insert(id, found.id);
                self.seen.insert(found.id, found.clone());
                Ok(Some(found))
            }
            Err(kind) => {
                warn!("Detail lookup for #{id} failed: {kind}");
                writeln!(self.out, "{}", render::failure(Operation::Detail, kind))?;
                Ok(None)
            }
        }
    }

    fn print_list(&mut self) -> io::Result<()> {
        let text = render::summaries(self.controller.items(), |item| self.is_favorite(item));
        writeln!(self.out, "{text}")?;
        if let Some(err) = self.controller.last_error() {
            writeln!(self.out, "(last error: {})", err.message)?;
        }
        Ok(())
    }

    fn print_detail(&mut self, item: &CatalogItemDetail) -> io::Result<()> {
        let card = render::detail(item, self.favorites.contains(item.id), WRAP_WIDTH);
        writeln!(self.out, "{card}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FailureKind, FetchError};
    use crate::test_support::{StubFetcher, detail, page, test_controller};

    fn shell(stub: StubFetcher) -> Shell<Vec<u8>> {
        let (controller, _) = test_controller(stub);
        Shell::new(controller, FavoritesStore::new(), Vec::new())
    }

    fn output(shell: Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[tokio::test]
    async fn test_run_loads_first_page_and_quits() {
        let mut sh = shell(StubFetcher::new().push_page(Ok(page(0, 3))));

        sh.run(&b"list\nquit\nmore\n"[..]).await.unwrap();

        assert_eq!(sh.controller().items().len(), 3);
        let text = output(sh);
        assert!(text.contains("#001 Mon-1"));
        assert!(text.contains("#003 Mon-3"));
    }

    #[tokio::test]
    async fn test_favorite_toggle_fetches_detail_once() {
        let stub = StubFetcher::new()
            .push_page(Ok(page(0, 3)))
            .with_detail("https://stub/pokemon/2/", Ok(detail(2, "ivysaur")));
        let mut sh = shell(stub);

        sh.run(&b"fav 2\nfavs\n"[..]).await.unwrap();
        assert!(sh.favorites().contains(2));

        sh.execute(ShellCommand::Favorite(2)).await.unwrap();
        assert!(sh.favorites().is_empty());

        let text = output(sh);
        assert!(text.contains("Added ivysaur to favorites."));
        assert!(text.contains("#002 Ivysaur"));
        assert!(text.contains("Removed ivysaur from favorites."));
    }

    #[tokio::test]
    async fn test_favorite_star_follows_remote_id() {
        let stub = StubFetcher::new()
            .push_page(Ok(page(0, 3)))
            .with_detail("https://stub/pokemon/3/", Ok(detail(10001, "mon-3")));
        let mut sh = shell(stub);

        sh.run(&b"fav 3\nlist\nshow 3\n"[..]).await.unwrap();

        assert!(sh.favorites().contains(10001));
        assert!(!sh.favorites().contains(3));
        let text = output(sh);
        assert!(text.contains("* #003 Mon-3"));
        assert!(text.contains("Mon-3 #10001  [favorite]"));
    }

    #[tokio::test]
    async fn test_list_number_wins_over_searched_remote_id() {
        let stub = StubFetcher::new()
            .push_page(Ok(page(0, 3)))
            .with_detail("https://stub/pokemon/2/", Ok(detail(2, "ivysaur")))
            .with_search("pikachu", Ok(detail(25, "pikachu")))
            .with_search("ditto", Ok(detail(2, "ditto")));
        let mut sh = shell(stub);

        sh.run(&b"search pikachu\nsearch ditto\nfav 25\nfav 2\n"[..])
            .await
            .unwrap();

        let names: Vec<&str> = sh.favorites().items().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["pikachu", "ivysaur"]);
    }

    #[tokio::test]
    async fn test_search_not_found_and_offline_render_differently() {
        let stub = StubFetcher::new()
            .push_page(Ok(page(0, 1)))
            .with_search("mew", Err(FetchError::Timeout));
        let mut sh = shell(stub);

        sh.run(&b"search missingmon\nsearch mew\n"[..]).await.unwrap();

        let text = output(sh);
        assert!(text.contains(&render::failure(Operation::Search, FailureKind::NotFound)));
        assert!(text.contains(&render::failure(Operation::Search, FailureKind::Network)));
    }

    #[tokio::test]
    async fn test_show_unloaded_entry_explains() {
        let mut sh = shell(StubFetcher::new().push_page(Ok(page(0, 1))));

        sh.run(&b"show 99\n"[..]).await.unwrap();

        assert!(output(sh).contains("Entry #99 is not loaded"));
    }

    #[tokio::test]
    async fn test_load_failure_keeps_shell_running() {
        let stub = StubFetcher::new().push_page(Err(FetchError::Transport("offline".into())));
        let mut sh = shell(stub);

        sh.run(&b"help\n"[..]).await.unwrap();

        assert!(!sh.controller().is_loading());
        let message = sh.controller().last_error().unwrap().message.clone();
        assert_eq!(message, render::failure(Operation::Load, FailureKind::Network));
        let text = output(sh);
        assert!(text.contains("Check your internet connection"));
        assert!(text.contains("Commands:"));
    }
}
