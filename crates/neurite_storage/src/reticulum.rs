//! Endoplasmic reticulum records attached to sections.

use neurite_foundation::{Error, Result, SectionId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reticulum content of one section.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReticulumEntry {
    /// Section holding the reticulum.
    pub section: SectionId,
    /// Volume, non-negative.
    pub volume: f64,
    /// Surface area, non-negative.
    pub surface_area: f64,
    /// Number of filaments.
    pub filament_count: u32,
}

impl ReticulumEntry {
    /// Creates a validated entry.
    ///
    /// # Errors
    ///
    /// Returns `RawData` if the volume or surface area is negative or not finite.
    pub fn new(section: SectionId, volume: f64, surface_area: f64, filament_count: u32) -> Result<Self> {
        for (what, value) in [("volume", volume), ("surface area", surface_area)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::raw_data(format!(
                    "reticulum {what} {value} on {section} must be non-negative"
                )));
            }
        }
        Ok(Self {
            section,
            volume,
            surface_area,
            filament_count,
        })
    }
}

/// Reticulum entries of a morphology, at most one per section, in section order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EndoplasmicReticulum {
    entries: Vec<ReticulumEntry>,
}

impl EndoplasmicReticulum {
    /// Creates an empty reticulum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a reticulum from entries, sorted by section.
    ///
    /// # Errors
    ///
    /// Returns `RawData` if two entries name the same section.
    pub fn from_entries(mut entries: Vec<ReticulumEntry>) -> Result<Self> {
        entries.sort_by_key(|e| e.section);
        if let Some(pair) = entries.windows(2).find(|w| w[0].section == w[1].section) {
            return Err(Error::raw_data(format!(
                "duplicate reticulum entry for {}",
                pair[0].section
            )));
        }
        Ok(Self { entries })
    }

    /// Inserts or replaces the entry of a section.
    pub fn insert(&mut self, entry: ReticulumEntry) {
        match self.entries.binary_search_by_key(&entry.section, |e| e.section) {
            Ok(i) => self.entries[i] = entry,
            Err(i) => self.entries.insert(i, entry),
        }
    }

    /// Removes the entry of a section, if any.
    pub fn remove(&mut self, section: SectionId) -> Option<ReticulumEntry> {
        let i = self
            .entries
            .binary_search_by_key(&section, |e| e.section)
            .ok()?;
        Some(self.entries.remove(i))
    }

    /// Entry of a section, if any.
    #[must_use]
    pub fn get(&self, section: SectionId) -> Option<&ReticulumEntry> {
        self.entries
            .binary_search_by_key(&section, |e| e.section)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// All entries in section order.
    #[must_use]
    pub fn entries(&self) -> &[ReticulumEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Host sections, in order.
    #[must_use]
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.entries.iter().map(|e| e.section).collect()
    }

    /// Volumes, in section order.
    #[must_use]
    pub fn volumes(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.volume).collect()
    }

    /// Surface areas, in section order.
    #[must_use]
    pub fn surface_areas(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.surface_area).collect()
    }

    /// Filament counts, in section order.
    #[must_use]
    pub fn filament_counts(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.filament_count).collect()
    }

    /// Checks that every entry names an existing section.
    ///
    /// # Errors
    ///
    /// Returns `RawData` for the first entry whose section fails `exists`.
    pub fn validate(&self, exists: impl Fn(SectionId) -> bool) -> Result<()> {
        match self.entries.iter().find(|e| !exists(e.section)) {
            Some(e) => Err(Error::raw_data(format!(
                "reticulum entry references unknown {}",
                e.section
            ))),
            None => Ok(()),
        }
    }

    /// Renames sections, dropping entries whose section maps to `None`.
    #[must_use]
    pub fn remap(&self, map: impl Fn(SectionId) -> Option<SectionId>) -> Self {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .filter_map(|e| {
                map(e.section).map(|section| ReticulumEntry { section, ..*e })
            })
            .collect();
        entries.sort_by_key(|e| e.section);
        Self { entries }
    }
}
