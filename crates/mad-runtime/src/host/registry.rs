use rhai::Dynamic;

/// Slot in a host's persistent registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RegistryKey(usize);

/// Engine-side store that outlives single calls and is separate from the
/// global scope. Freed slots are reused.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    slots: Vec<Option<Dynamic>>,
    free: Vec<usize>,
}

impl Registry {
    pub(crate) fn insert(&mut self, value: Dynamic) -> RegistryKey {
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(value);
            return RegistryKey(slot);
        }
        self.slots.push(Some(value));
        RegistryKey(self.slots.len() - 1)
    }

    pub(crate) fn get(&self, key: RegistryKey) -> Option<&Dynamic> {
        self.slots.get(key.0).and_then(Option::as_ref)
    }

    pub(crate) fn remove(&mut self, key: RegistryKey) -> Option<Dynamic> {
        let value = self.slots.get_mut(key.0)?.take();
        if value.is_some() {
            self.free.push(key.0);
        }
        value
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
