//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Keys carry a generation, so a handle to a despawned actor never
    /// aliases an actor spawned later into the same slot.
    pub struct Entity;
}
