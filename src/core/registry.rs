// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Dialect registry.
//!
//! Maps dialect names and CPU names to the [`Dialect`] bundle an evaluator
//! should use. Names are matched case-insensitively. A CPU selects its
//! vendor's dialect unless an explicit dialect overrides it.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::core::dialect::Dialect;
use crate::dialects;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Unknown dialect: {0}")]
    MissingDialect(String),
    #[error("Unknown CPU: {0}")]
    MissingCpu(String),
    #[error("CPU {cpu} maps to unknown dialect {dialect}")]
    BrokenCpuMapping { cpu: String, dialect: String },
}

/// CPU names and the vendor dialect their assemblers use.
const DEFAULT_CPUS: &[(&str, &str)] = &[
    ("6800", "motorola"),
    ("6805", "motorola"),
    ("6809", "motorola"),
    ("68hc11", "motorola"),
    ("6502", "motorola"),
    ("65c02", "motorola"),
    ("65816", "motorola"),
    ("8080", "intel"),
    ("8085", "intel"),
    ("8086", "intel"),
    ("z80", "intel"),
    ("8048", "intel"),
    ("8051", "intel"),
    ("z8", "zilog"),
    ("z8000", "zilog"),
    ("ins8060", "national"),
    ("ins8070", "national"),
    ("scmp", "national"),
    ("ns32000", "national"),
    ("f3850", "fairchild"),
    ("cdp1802", "rca"),
    ("2650", "signetics"),
    ("tms9900", "texas"),
    ("tms7000", "texas"),
    ("i370", "ibm"),
];

pub struct DialectRegistry {
    dialects: HashMap<String, &'static Dialect>,
    cpus: HashMap<String, String>,
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self {
            dialects: HashMap::new(),
            cpus: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for dialect in dialects::ALL_DIALECTS {
            registry.register_dialect(dialect);
        }
        for (cpu, dialect) in DEFAULT_CPUS {
            registry.register_cpu(cpu, dialect);
        }
        registry
    }

    pub fn register_dialect(&mut self, dialect: &'static Dialect) {
        self.dialects.insert(normalize_name(dialect.name), dialect);
    }

    pub fn register_cpu(&mut self, cpu: &str, dialect: &str) {
        self.cpus.insert(normalize_name(cpu), normalize_name(dialect));
    }

    pub fn resolve_dialect(&self, name: &str) -> Result<&'static Dialect, RegistryError> {
        let dialect = self
            .dialects
            .get(&normalize_name(name))
            .copied()
            .ok_or_else(|| RegistryError::MissingDialect(name.to_string()))?;
        debug!(dialect = dialect.name, "resolved dialect");
        Ok(dialect)
    }

    pub fn resolve_cpu(&self, cpu: &str) -> Result<&'static Dialect, RegistryError> {
        let name = self
            .cpus
            .get(&normalize_name(cpu))
            .ok_or_else(|| RegistryError::MissingCpu(cpu.to_string()))?;
        let dialect = self.dialects.get(name).copied().ok_or_else(|| {
            RegistryError::BrokenCpuMapping {
                cpu: cpu.to_string(),
                dialect: name.clone(),
            }
        })?;
        debug!(cpu, dialect = dialect.name, "resolved CPU dialect");
        Ok(dialect)
    }

    /// Pick a dialect from an explicit override, else from the CPU, else `default`.
    pub fn resolve(
        &self,
        dialect_override: Option<&str>,
        cpu: Option<&str>,
        default: &str,
    ) -> Result<&'static Dialect, RegistryError> {
        match (dialect_override, cpu) {
            (Some(name), _) => self.resolve_dialect(name),
            (None, Some(cpu)) => self.resolve_cpu(cpu),
            (None, None) => self.resolve_dialect(default),
        }
    }

    /// Registered dialects sorted by name.
    pub fn dialects(&self) -> Vec<&'static Dialect> {
        let mut dialects: Vec<_> = self.dialects.values().copied().collect();
        dialects.sort_by_key(|dialect| dialect.name);
        dialects
    }

    /// `(cpu, dialect)` pairs sorted by CPU name.
    pub fn cpus(&self) -> Vec<(&str, &str)> {
        let mut cpus: Vec<_> = self
            .cpus
            .iter()
            .map(|(cpu, dialect)| (cpu.as_str(), dialect.as_str()))
            .collect();
        cpus.sort_unstable();
        cpus
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
