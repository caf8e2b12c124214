//! Interactive text menu over an [`IncidentStore`].
//!
//! Reads choices and answers line by line from any `BufRead` and writes
//! prompts and results to any `Write`, so a whole session can be scripted.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::analysis::count_by_category;
use crate::error::StoreError;
use crate::geocode::GeocodingResolver;
use crate::mapping;
use crate::store::IncidentStore;

/// Everything the menu can do. Choices "1" through "7" map onto these in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Create,
  Read,
  Update,
  Delete,
  Map,
  Analyze,
  Exit,
}

impl Command {
  pub const ALL: [Command; 7] = [
    Self::Create,
    Self::Read,
    Self::Update,
    Self::Delete,
    Self::Map,
    Self::Analyze,
    Self::Exit,
  ];

  pub fn from_choice(choice: &str) -> Option<Self> {
    match choice {
      "1" => Some(Self::Create),
      "2" => Some(Self::Read),
      "3" => Some(Self::Update),
      "4" => Some(Self::Delete),
      "5" => Some(Self::Map),
      "6" => Some(Self::Analyze),
      "7" => Some(Self::Exit),
      _ => None,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Create => "Create Incident Data",
      Self::Read => "Read Incident Data",
      Self::Update => "Update Incident Data",
      Self::Delete => "Delete Incident Data",
      Self::Map => "Map Incident Locations",
      Self::Analyze => "Analyze Incident Patterns",
      Self::Exit => "Exit",
    }
  }
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
  Continue,
  Stop,
}

/// One menu session bound to a store and an input/output pair.
pub struct Menu<'s, R, I, O> {
  store: &'s mut IncidentStore<R>,
  input: I,
  output: O,
}

impl<'s, R, I, O> Menu<'s, R, I, O>
where
  R: GeocodingResolver,
  I: BufRead,
  O: Write,
{
  pub fn new(store: &'s mut IncidentStore<R>, input: I, output: O) -> Self {
    Self { store, input, output }
  }

  /// Run until the user picks Exit or input runs out.
  pub fn run(&mut self) -> io::Result<()> {
    loop {
      self.print_menu()?;
      let Some(choice) = self.prompt("Enter your choice: ")? else {
        break;
      };

      let flow = match Command::from_choice(&choice) {
        Some(command) => {
          debug!(?command, "menu command");
          self.dispatch(command)?
        }
        None => {
          writeln!(self.output, "Invalid option")?;
          Flow::Continue
        }
      };

      if flow == Flow::Stop {
        break;
      }
    }
    self.output.flush()
  }

  fn dispatch(&mut self, command: Command) -> io::Result<Flow> {
    match command {
      Command::Create => self.create(),
      Command::Read => self.read().map(|()| Flow::Continue),
      Command::Update => self.update(),
      Command::Delete => self.delete(),
      Command::Map => self.map().map(|()| Flow::Continue),
      Command::Analyze => self.analyze().map(|()| Flow::Continue),
      Command::Exit => {
        writeln!(self.output, "Exiting program")?;
        Ok(Flow::Stop)
      }
    }
  }

  fn print_menu(&mut self) -> io::Result<()> {
    writeln!(self.output, "\nMenu:")?;
    for (n, command) in Command::ALL.iter().enumerate() {
      writeln!(self.output, "{}. {}", n + 1, command.label())?;
    }
    Ok(())
  }

  /// Write `text`, then read one line with the newline stripped. `None` on EOF.
  fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
    write!(self.output, "{}", text)?;
    self.output.flush()?;

    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
  }

  /// Prompts in order; `None` if input ends before every answer is in.
  fn ask_all<const N: usize>(&mut self, prompts: [&str; N]) -> io::Result<Option<[String; N]>> {
    let mut answers: [String; N] = std::array::from_fn(|_| String::new());
    for (answer, text) in answers.iter_mut().zip(prompts) {
      match self.prompt(text)? {
        Some(line) => *answer = line,
        None => {
          debug!("input ended mid-command; nothing applied");
          return Ok(None);
        }
      }
    }
    Ok(Some(answers))
  }

  fn create(&mut self) -> io::Result<Flow> {
    let Some([id, category, address]) =
      self.ask_all(["Enter incident ID: ", "Enter incident category: ", "Enter address: "])?
    else {
      return Ok(Flow::Stop);
    };

    match self.store.create(&id, &category, &address) {
      Ok(()) => writeln!(self.output, "Incident data created successfully")?,
      Err(_) => writeln!(self.output, "Address not found. Please enter a valid address.")?,
    }
    Ok(Flow::Continue)
  }

  fn read(&mut self) -> io::Result<()> {
    if self.store.is_empty() {
      return writeln!(self.output, "No incident data available");
    }
    for record in self.store.read_all() {
      writeln!(self.output, "Incident ID: {}", record.id())?;
      writeln!(self.output, "Category: {}", record.category())?;
      writeln!(self.output, "Latitude: {}", record.latitude())?;
      writeln!(self.output, "Longitude: {}", record.longitude())?;
      writeln!(self.output)?;
    }
    Ok(())
  }

  fn update(&mut self) -> io::Result<Flow> {
    let Some([id]) = self.ask_all(["Enter incident ID to update: "])? else {
      return Ok(Flow::Stop);
    };
    // Checked up front so the user isn't asked for details of a missing record.
    if self.store.find_by_id(&id).is_none() {
      writeln!(self.output, "Incident ID does not exist")?;
      return Ok(Flow::Continue);
    }

    let Some([category, address]) =
      self.ask_all(["Enter new incident category: ", "Enter new address: "])?
    else {
      return Ok(Flow::Stop);
    };

    match self.store.update(&id, &category, &address) {
      Ok(()) => writeln!(self.output, "Incident data updated successfully")?,
      Err(StoreError::AddressNotResolved { .. }) => {
        writeln!(self.output, "Address not found. Incident data not updated.")?
      }
      Err(StoreError::RecordNotFound { .. }) => writeln!(self.output, "Incident ID does not exist")?,
    }
    Ok(Flow::Continue)
  }

  fn delete(&mut self) -> io::Result<Flow> {
    let Some([id]) = self.ask_all(["Enter incident ID to delete: "])? else {
      return Ok(Flow::Stop);
    };
    match self.store.delete(&id) {
      Ok(()) => writeln!(self.output, "Incident data deleted successfully")?,
      Err(_) => writeln!(self.output, "Incident ID does not exist")?,
    }
    Ok(Flow::Continue)
  }

  /// Emit one JSON point per line for the plotting side.
  fn map(&mut self) -> io::Result<()> {
    if self.store.is_empty() {
      return writeln!(self.output, "No incident data available to map");
    }
    writeln!(self.output, "Incident locations (longitude, latitude):")?;
    for point in mapping::project(self.store.read_all()) {
      serde_json::to_writer(&mut self.output, &point)?;
      writeln!(self.output)?;
    }
    Ok(())
  }

  fn analyze(&mut self) -> io::Result<()> {
    let counts = count_by_category(self.store.read_all());
    if counts.is_empty() {
      return writeln!(self.output, "No incident data available to analyze");
    }
    writeln!(self.output, "Incident patterns:")?;
    for row in counts.iter() {
      writeln!(self.output, "- Category: {}, Count: {}", row.category, row.count)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geocode::TableResolver;
  use crate::types::Coordinate;
  use std::cell::RefCell;

  /// Resolves every address to (1, 2) and remembers what it was asked.
  #[derive(Default)]
  struct RecordingResolver {
    seen: RefCell<Vec<String>>,
  }

  impl GeocodingResolver for RecordingResolver {
    fn resolve(&self, address: &str) -> Option<Coordinate> {
      self.seen.borrow_mut().push(address.to_string());
      Some(Coordinate::new(1.0, 2.0))
    }
  }

  fn run_recording(store: &mut IncidentStore<RecordingResolver>, script: &str) -> String {
    let mut out = Vec::new();
    Menu::new(store, script.as_bytes(), &mut out).run().unwrap();
    String::from_utf8(out).unwrap()
  }

  fn session(script: &str) -> (String, IncidentStore<TableResolver>) {
    let mut store = IncidentStore::new(TableResolver::new().with("100 Main St", 40.0, -75.0));
    let mut out = Vec::new();
    Menu::new(&mut store, script.as_bytes(), &mut out).run().unwrap();
    (String::from_utf8(out).unwrap(), store)
  }

  #[test]
  fn choices_map_to_commands() {
    for (n, command) in Command::ALL.iter().enumerate() {
      assert_eq!(Command::from_choice(&(n + 1).to_string()), Some(*command));
    }
    assert_eq!(Command::from_choice(" 2 "), None);
    assert_eq!(Command::from_choice("8"), None);
    assert_eq!(Command::from_choice(""), None);
  }

  #[test]
  fn invalid_choice_is_reported() {
    let (out, _) = session("9\n7\n");
    assert!(out.contains("Invalid option"));
    assert!(out.contains("Exiting program"));
  }

  #[test]
  fn eof_ends_session() {
    let (out, _) = session("");
    assert!(out.contains("Enter your choice: "));
    assert!(!out.contains("Exiting program"));
  }

  #[test]
  fn input_ending_mid_create_applies_nothing() {
    let mut store = IncidentStore::new(RecordingResolver::default());
    let out = run_recording(&mut store, "1\n42\n");

    assert!(store.is_empty());
    assert!(store.read_all().is_empty());
    assert!(out.ends_with("Enter incident category: "));
    assert!(!out.contains("Incident data created successfully"));
  }

  #[test]
  fn input_ending_mid_update_keeps_record() {
    let mut store = IncidentStore::new(RecordingResolver::default());
    store.create("42", "theft", "100 Main St").unwrap();

    let out = run_recording(&mut store, "3\n42\nburglary\n");

    let record = store.find_by_id("42").unwrap();
    assert_eq!(record.category(), "theft");
    assert_eq!(store.read_all().len(), 1);
    assert!(!out.contains("Incident data updated successfully"));
  }

  #[test]
  fn input_ending_mid_commands_never_reaches_resolver() {
    let mut store = IncidentStore::new(RecordingResolver::default());
    run_recording(&mut store, "1\n42\ntheft\n");
    let mut store_with_record = IncidentStore::new(RecordingResolver::default());
    store_with_record.create("42", "theft", "100 Main St").unwrap();
    run_recording(&mut store_with_record, "3\n42\n");

    assert_eq!(store.resolver().seen.borrow().len(), 0);
    assert_eq!(store_with_record.resolver().seen.borrow().len(), 1);
  }

  #[test]
  fn input_ending_before_delete_id_keeps_record() {
    let mut store = IncidentStore::new(RecordingResolver::default());
    store.create("42", "theft", "100 Main St").unwrap();
    let out = run_recording(&mut store, "4\n");
    assert_eq!(store.len(), 1);
    assert!(!out.contains("Incident data deleted successfully"));
  }

  #[test]
  fn update_of_missing_id_asks_nothing_more() {
    let (out, _) = session("3\n42\n7\n");
    assert!(out.contains("Incident ID does not exist"));
    assert!(!out.contains("Enter new incident category: "));
  }

  #[test]
  fn empty_store_messages() {
    let (out, _) = session("2\n5\n6\n7\n");
    assert!(out.contains("No incident data available\n"));
    assert!(out.contains("No incident data available to map"));
    assert!(out.contains("No incident data available to analyze"));
  }

  #[test]
  fn map_emits_json_points() {
    let (out, _) = session("1\n1\ntheft\n100 Main St\n5\n7\n");
    assert!(out.contains(r#"{"longitude":-75.0,"latitude":40.0}"#));
  }
}
