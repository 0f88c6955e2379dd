// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Wrapper giving 'Debug' to struct members that must not, or cannot, print their contents

use std::fmt;

use derive_more::{Deref, DerefMut, From};

/// Prints only the wrapped type's name, so transcripts and secrets never reach debug output
#[derive(From, Deref, DerefMut)]
pub struct NonDebug<T> {
    inner: T,
}

impl<T> fmt::Debug for NonDebug<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NonDebug<{}>", std::any::type_name::<T>())
    }
}
