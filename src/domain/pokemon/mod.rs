pub mod entity;
pub mod invariants;
pub mod lookup;

pub use entity::{
    merge_attributes, normalize_name, CreatePokemon, Pagination, PokemonRecord, UpdatePokemon,
    RESERVED_FIELDS,
};
pub use invariants::{validate_create, validate_pagination, validate_update};
pub use lookup::LookupKey;
