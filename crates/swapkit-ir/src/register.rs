//! Named quantum registers.
//!
//! A [`QuantumRegister`] starts out detached: it knows its name and size but
//! its qubits have no circuit ids yet. [`Circuit::add_register`] attaches it
//! and hands back a copy whose handles resolve to [`QubitId`]s.
//!
//! [`Circuit::add_register`]: crate::Circuit::add_register

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// A named, ordered group of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantumRegister {
    name: String,
    size: u32,
    /// Id of the first qubit once attached to a circuit.
    offset: Option<u32>,
}

impl QuantumRegister {
    /// Create a detached register.
    ///
    /// `size` must fit a `u32`. Negative values are rejected with
    /// [`IrError::InvalidArgument`], as are names that are not valid
    /// `OpenQASM` identifiers (`[a-z][A-Za-z0-9_]*`).
    pub fn new<S>(size: S, name: impl Into<String>) -> IrResult<Self>
    where
        S: TryInto<u32> + fmt::Display + Copy,
    {
        let size = size.try_into().map_err(|_| {
            IrError::InvalidArgument(format!(
                "register size must be a non-negative integer, got {size}"
            ))
        })?;

        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            name,
            size,
            offset: None,
        })
    }

    pub(crate) fn attach(&self, offset: u32) -> Self {
        Self {
            name: self.name.clone(),
            size: self.size,
            offset: Some(offset),
        }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits in the register.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the register has no qubits.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether this handle belongs to a circuit.
    pub fn is_attached(&self) -> bool {
        self.offset.is_some()
    }

    /// Qubit at `index`, or `None` if detached or out of range.
    pub fn get(&self, index: usize) -> Option<QubitId> {
        let offset = self.offset?;
        let index = u32::try_from(index).ok()?;
        (index < self.size).then(|| QubitId(offset + index))
    }

    /// Qubit at `index`, with a descriptive error instead of `None`.
    pub fn qubit(&self, index: usize) -> IrResult<QubitId> {
        if !self.is_attached() {
            return Err(IrError::InvalidArgument(format!(
                "register '{}' is not attached to a circuit",
                self.name
            )));
        }
        self.get(index).ok_or_else(|| IrError::IndexOutOfRange {
            register: self.name.clone(),
            index,
            size: self.size(),
        })
    }

    /// Iterate the register's qubits in order. Empty while detached.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        let (offset, len) = match self.offset {
            Some(offset) => (offset, self.size),
            None => (0, 0),
        };
        (offset..offset + len).map(QubitId)
    }
}

impl fmt::Display for QuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.size)
    }
}

fn validate_name(name: &str) -> IrResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_lowercase() && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(IrError::InvalidArgument(format!(
            "'{name}' is not a valid register name"
        )))
    }
}
