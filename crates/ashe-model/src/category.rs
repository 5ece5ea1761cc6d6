//! The nine employee categories every extract is split into.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Employee category, in the order sections appear in a raw extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    All,
    FullTime,
    PartTime,
    Female,
    FemaleFullTime,
    FemalePartTime,
    Male,
    MaleFullTime,
    MalePartTime,
}

impl Category {
    /// Extract order. Section `i` of an extract belongs to `ALL[i]`.
    pub const ALL: [Category; 9] = [
        Category::All,
        Category::FullTime,
        Category::PartTime,
        Category::Female,
        Category::FemaleFullTime,
        Category::FemalePartTime,
        Category::Male,
        Category::MaleFullTime,
        Category::MalePartTime,
    ];

    /// Label used by the survey extracts.
    pub fn source_label(self) -> &'static str {
        match self {
            Category::All => "All Employees - All Employees",
            Category::FullTime => "All Employees - FULL TIME EMPLOYEES",
            Category::PartTime => "All Employees - PART TIME EMPLOYEES",
            Category::Female => "Females - All Employees",
            Category::FemaleFullTime => "Females - FULL TIME EMPLOYEES",
            Category::FemalePartTime => "Females - PART TIME EMPLOYEES",
            Category::Male => "Males - All Employees",
            Category::MaleFullTime => "Males - FULL TIME EMPLOYEES",
            Category::MalePartTime => "Males - PART TIME EMPLOYEES",
        }
    }

    /// Tab name in the publication workbook.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::FullTime => "Full-Time",
            Category::PartTime => "Part-Time",
            Category::Female => "Female",
            Category::FemaleFullTime => "Female Full-Time",
            Category::FemalePartTime => "Female Part-Time",
            Category::Male => "Male",
            Category::MaleFullTime => "Male Full-Time",
            Category::MalePartTime => "Male Part-Time",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    /// Accepts either the extract label or the sheet name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| {
                category.source_label().eq_ignore_ascii_case(trimmed)
                    || category.sheet_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ModelError::UnknownCategory {
                label: trimmed.to_string(),
            })
    }
}

/// One value per category, always all nine, in extract order.
#[derive(Debug, Clone, PartialEq)]
pub struct PerCategory<T> {
    items: Vec<T>,
}

impl<T> PerCategory<T> {
    pub fn from_fn(f: impl FnMut(Category) -> T) -> Self {
        Self {
            items: Category::ALL.into_iter().map(f).collect(),
        }
    }

    /// Stops at the first category that fails.
    pub fn try_from_fn<E>(f: impl FnMut(Category) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            items: Category::ALL
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, E>>()?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.items.iter())
    }

    pub fn map<U>(self, mut f: impl FnMut(Category, T) -> U) -> PerCategory<U> {
        PerCategory {
            items: Category::ALL
                .into_iter()
                .zip(self.items)
                .map(|(category, item)| f(category, item))
                .collect(),
        }
    }
}

impl<T> IntoIterator for PerCategory<T> {
    type Item = (Category, T);
    type IntoIter = std::iter::Zip<std::array::IntoIter<Category, 9>, std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        Category::ALL.into_iter().zip(self.items)
    }
}

impl<T> Index<Category> for PerCategory<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        &self.items[category.index()]
    }
}

impl<T> IndexMut<Category> for PerCategory<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.items[category.index()]
    }
}
