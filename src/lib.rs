// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Library entry exposing the expression engine and its dialects.
pub mod cli;
pub mod core;
pub mod dialects;
