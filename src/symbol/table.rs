use std::collections::HashMap;

/// One flat scope: every name is unique across the whole program.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable<T> {
    map: HashMap<String, T>,
}

impl<T> Default for SymbolTable<T> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<T> SymbolTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` unless it is already bound. Returns whether the binding was made.
    pub fn define(&mut self, key: &str, value: T) -> bool {
        if self.map.contains_key(key) {
            return false;
        }
        self.map.insert(key.to_string(), value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.map.get(key)
    }

    pub fn is_defined(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}
