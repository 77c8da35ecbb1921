//! The interactive menu loop and the state it owns.
use crate::picker::sampler;
use crate::picker::{Item, Outcome, PersistedState, PickError, PickResult, Seed, Store};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use std::io::{BufRead, Write};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    ShowItems,
    AddItem,
    RemoveItem,
    PickOne,
    PickMany,
    Shuffle,
    ShowHistory,
    ClearHistory,
    SetSeed,
    SaveAndExit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<MenuChoice> {
        match input.trim() {
            "1" => Some(MenuChoice::ShowItems),
            "2" => Some(MenuChoice::AddItem),
            "3" => Some(MenuChoice::RemoveItem),
            "4" => Some(MenuChoice::PickOne),
            "5" => Some(MenuChoice::PickMany),
            "6" => Some(MenuChoice::Shuffle),
            "7" => Some(MenuChoice::ShowHistory),
            "8" => Some(MenuChoice::ClearHistory),
            "9" => Some(MenuChoice::SetSeed),
            "0" => Some(MenuChoice::SaveAndExit),
            _ => None,
        }
    }
}

const MENU: &str = "
=== RANDOMIZER ===
1) Show items
2) Add/update item
3) Remove item
4) Pick one item
5) Pick N unique items
6) Shuffle items
7) Show history
8) Clear history
9) Set seed
0) Save and exit";

///
/// One run of the tool: the state loaded from the store, the random source,
/// and the store every action is saved back to.
///
pub struct Session {
    store: Store,
    state: PersistedState,
    rng: StdRng,
    history_limit: usize,
}

impl Session {
    /// Loads the store and seeds the random source from the persisted seed.
    pub fn open(store: Store, history_limit: usize) -> PickResult<Session> {
        let state = store.load()?;
        Ok(Session::new(store, state, history_limit))
    }

    pub fn new(store: Store, state: PersistedState, history_limit: usize) -> Session {
        if !state.seed.is_unset() {
            info!("Seeding from persisted seed {}", state.seed);
        }
        let rng = state.seed.rng();
        Session {
            store,
            state,
            rng,
            history_limit,
        }
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn add_or_update(&mut self, name: &str, weight: f64) -> PickResult<Outcome> {
        self.state.items.add_or_update(name, weight)
    }

    pub fn remove(&mut self, name: &str) -> PickResult<Item> {
        self.state.items.remove(name)
    }

    pub fn pick_one(&mut self) -> PickResult<String> {
        let choice = sampler::pick_one(self.state.items.list(), &mut self.rng)?;
        info!("Picked {}", choice);
        self.state.history.append(vec![choice.clone()]);
        Ok(choice)
    }

    pub fn pick_many(&mut self, k: i64) -> PickResult<Vec<String>> {
        let picks = sampler::pick_many(self.state.items.list(), k, &mut self.rng)?;
        info!("Picked {:?}", picks);
        self.state.history.append(picks.clone());
        Ok(picks)
    }

    pub fn shuffle(&mut self) -> PickResult<Vec<String>> {
        sampler::shuffle(self.state.items.list(), &mut self.rng)
    }

    pub fn clear_history(&mut self) {
        self.state.history.clear();
    }

    /// Reseeds future draws. History already recorded is untouched.
    pub fn set_seed(&mut self, input: &str) -> &Seed {
        self.state.seed = Seed::parse(input);
        info!("Reseeding with {:?}", self.state.seed);
        self.rng = self.state.seed.rng();
        &self.state.seed
    }

    pub fn save(&self) -> PickResult<()> {
        self.store.save(&self.state)
    }

    ///
    /// Runs the menu until "save and exit" or the end of input, saving after
    /// every action. Input, not-found and empty-list errors are printed and
    /// the loop goes on; anything else (a broken output stream) ends the run.
    ///
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> PickResult<()> {
        loop {
            writeln!(output, "{}", MENU)?;
            let line = match prompt(&mut input, &mut output, "Choose: ")? {
                Some(line) => line,
                None => {
                    debug!("End of input, saving and exiting");
                    return self.exit(&mut output);
                }
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::SaveAndExit) => return self.exit(&mut output),
                Some(choice) => {
                    debug!("Menu choice {:?}", choice);
                    match self.dispatch(choice, &mut input, &mut output) {
                        Ok(()) => {}
                        Err(err) if err.recoverable() => writeln!(output, "{}", err)?,
                        Err(err) => return Err(err),
                    }
                }
                None => writeln!(output, "Invalid choice.")?,
            }

            if let Err(err) = self.save() {
                warn!("Autosave to {} failed: {}", self.store.path().display(), err);
                writeln!(output, "Autosave failed: {}", err)?;
            }
        }
    }

    fn exit<W: Write>(&self, output: &mut W) -> PickResult<()> {
        self.save()?;
        writeln!(output, "Saved. Bye!")?;
        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        input: &mut R,
        output: &mut W,
    ) -> PickResult<()> {
        match choice {
            MenuChoice::ShowItems => {
                if self.state.items.is_empty() {
                    writeln!(output, "List is empty.")?;
                    return Ok(());
                }
                writeln!(output, "\n--- ITEMS ---")?;
                for (i, item) in self.state.items.list().iter().enumerate() {
                    writeln!(output, "{}. {}  (weight={:?})", i + 1, item.name, item.weight)?;
                }
            }
            MenuChoice::AddItem => {
                let name = require(prompt(input, output, "Enter option name: ")?)?;
                if name.is_empty() {
                    return Err(PickError::input("Empty name is not allowed."));
                }
                if self.state.items.find(&name).is_some() {
                    writeln!(output, "This option already exists. Updating weight.")?;
                }
                let weight_input = require(prompt(input, output, "Weight (default 1.0): ")?)?;
                let weight = if weight_input.is_empty() {
                    1.0
                } else {
                    weight_input
                        .parse::<f64>()
                        .map_err(|_| PickError::input("Weight must be a number."))?
                };
                let verb = match self.add_or_update(&name, weight)? {
                    Outcome::Created => "Added",
                    Outcome::Updated => "Updated",
                };
                let stored = self
                    .state
                    .items
                    .find(&name)
                    .and_then(|index| self.state.items.get(index))
                    .map_or(name.as_str(), |item| item.name.as_str());
                writeln!(output, "{}: {} (weight={:?})", verb, stored, weight)?;
            }
            MenuChoice::RemoveItem => {
                let name = require(prompt(input, output, "Enter option name to remove: ")?)?;
                let removed = self.remove(&name)?;
                writeln!(output, "Removed: {}", removed.name)?;
            }
            MenuChoice::PickOne => {
                let choice = self.pick_one()?;
                writeln!(output, "Pick: {}", choice)?;
            }
            MenuChoice::PickMany => {
                if self.state.items.is_empty() {
                    return Err(PickError::NoItems);
                }
                let count = require(prompt(input, output, "How many unique items to pick? ")?)?;
                let k = parse_count(&count)?;
                let picks = self.pick_many(k)?;
                writeln!(output, "Picks: {}", picks.join(", "))?;
            }
            MenuChoice::Shuffle => {
                let names = self.shuffle()?;
                writeln!(output, "Shuffled: {}", names.join(", "))?;
            }
            MenuChoice::ShowHistory => {
                if self.state.history.is_empty() {
                    writeln!(output, "History is empty.")?;
                    return Ok(());
                }
                writeln!(output, "\n--- HISTORY ---")?;
                for line in self.state.history.show(self.history_limit) {
                    writeln!(output, "{}", line)?;
                }
            }
            MenuChoice::ClearHistory => {
                self.clear_history();
                writeln!(output, "History cleared.")?;
            }
            MenuChoice::SetSeed => {
                let seed_input = require(prompt(input, output, "Seed (empty to reset): ")?)?;
                match self.set_seed(&seed_input) {
                    Seed::Unset => writeln!(output, "Seed reset.")?,
                    seed => writeln!(output, "Seed set to: {}", seed)?,
                }
            }
            MenuChoice::SaveAndExit => unreachable!("handled by run"),
        }
        Ok(())
    }
}

/// Writes `text`, then reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> PickResult<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Integers too big for `i64` saturate, so the range check reports them.
fn parse_count(text: &str) -> PickResult<i64> {
    if let Ok(count) = text.parse::<i64>() {
        return Ok(count);
    }
    let digits = text
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(text);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(if text.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });
    }
    Err(PickError::input("Enter a valid integer."))
}

fn require(line: Option<String>) -> PickResult<String> {
    line.ok_or_else(|| PickError::input("No input."))
}
