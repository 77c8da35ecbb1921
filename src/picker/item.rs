use super::error::{PickError, PickResult};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub weight: f64,
}

/// What `add_or_update` did to the registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
}

fn normalise(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn check_weight(weight: f64) -> PickResult<f64> {
    if !weight.is_finite() {
        return Err(PickError::input("Weight must be a number."));
    }
    if weight <= 0.0 {
        return Err(PickError::input("Weight must be > 0."));
    }
    Ok(weight)
}

///
/// The weighted options, in the order they were first added.
///
/// Names are unique once trimmed and lowercased; the stored name keeps the
/// casing it was first added with.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    items: Vec<Item>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        let wanted = normalise(name);
        self.items
            .iter()
            .position(|item| normalise(&item.name) == wanted)
    }

    pub fn add_or_update(&mut self, name: &str, weight: f64) -> PickResult<Outcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PickError::input("Empty name is not allowed."));
        }
        let weight = check_weight(weight)?;
        match self.find(name) {
            Some(index) => {
                debug!("Updating {} to weight {}", self.items[index].name, weight);
                self.items[index].weight = weight;
                Ok(Outcome::Updated)
            }
            None => {
                debug!("Adding {} with weight {}", name, weight);
                self.items.push(Item {
                    name: name.to_string(),
                    weight,
                });
                Ok(Outcome::Created)
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> PickResult<Item> {
        match self.find(name) {
            Some(index) => Ok(self.items.remove(index)),
            None => Err(PickError::NotFound(name.trim().to_string())),
        }
    }

    pub fn list(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks a registry that came from somewhere other than `add_or_update`.
    pub fn validate(&self) -> Result<(), String> {
        for (i, item) in self.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(format!("item {} has an empty name", i + 1));
            }
            if check_weight(item.weight).is_err() {
                return Err(format!(
                    "item {:?} has invalid weight {}",
                    item.name, item.weight
                ));
            }
            if self.find(&item.name) != Some(i) {
                return Err(format!("item {:?} is listed twice", item.name));
            }
        }
        Ok(())
    }
}

impl FromIterator<Item> for Registry {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Registry {
            items: iter.into_iter().collect(),
        }
    }
}
