//! Circular dependency detection.

use lazydi_core::{DependencyChain, Error, Result, TokenKey};

/// The tokens currently being realized by one top-level resolution, outermost first.
///
/// A [`Resolver`](crate::resolver::Resolver) owns one stack and threads it through every
/// nested resolution, so unrelated resolutions never observe each other's tokens.
#[derive(Debug, Default)]
pub struct ResolutionStack {
    tokens: Vec<TokenKey>,
}

impl ResolutionStack {
    /// Creates an empty stack.
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Returns the tokens in flight, outermost first.
    pub fn tokens(&self) -> &[TokenKey] {
        &self.tokens
    }

    pub fn depth(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, key: &TokenKey) -> bool {
        self.tokens.contains(key)
    }

    /// Marks `key` as being realized.
    ///
    /// # Errors
    ///
    /// If `key` is already in flight, the stack is cleared and
    /// [`Error::CircularDependency`] is returned with the chain of tokens in flight followed
    /// by `key` again.
    pub fn enter(&mut self, key: TokenKey) -> Result<()> {
        if self.contains(&key) {
            let mut chain = std::mem::take(&mut self.tokens);
            chain.push(key);
            let chain = DependencyChain::new(chain);
            warn!(%chain, "circular dependency");
            return Err(Error::CircularDependency(chain));
        }

        self.tokens.push(key);
        Ok(())
    }

    /// Drops every token entered at or after `depth`.
    ///
    /// After a cycle cleared the stack this does nothing, so an aborted resolution stays
    /// aborted until the top-level call returns.
    pub fn exit(&mut self, depth: usize) {
        self.tokens.truncate(depth);
    }
}
