// src/services/pokemon_service.rs
use std::error::Error as _;

use crate::domain::pokemon::{
    normalize_name, CreatePokemon, LookupKey, Pagination, PokemonRecord, UpdatePokemon,
};
use crate::error::{AppError, ServiceError, ServiceResult};
use crate::repositories::PokemonRepository;
use std::sync::Arc;
use uuid::Uuid;

pub struct PokemonService {
    pokemon_repo: Arc<dyn PokemonRepository>,
    default_limit: u32,
}

impl PokemonService {
    pub fn new(pokemon_repo: Arc<dyn PokemonRepository>, default_limit: u32) -> Self {
        Self {
            pokemon_repo,
            default_limit,
        }
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    pub async fn create(&self, mut input: CreatePokemon) -> ServiceResult<PokemonRecord> {
        input.name = normalize_name(&input.name);
        let record = PokemonRecord::new(input);

        self.pokemon_repo
            .insert(&record)
            .await
            .map_err(handle_exceptions)?;

        log::info!("Created pokemon {} ({})", record.name, record.id);
        Ok(record)
    }

    pub async fn find_all(&self, pagination: Pagination) -> ServiceResult<Vec<PokemonRecord>> {
        let (limit, skip) = pagination.window(self.default_limit);
        log::debug!("Listing pokemon: limit={} skip={}", limit, skip);

        self.pokemon_repo
            .list(limit, skip)
            .await
            .map_err(handle_exceptions)
    }

    /// Resolve a term as a catalog index, then a storage id, then a name.
    /// The first strategy that finds a record wins.
    pub async fn find_one(&self, term: &str) -> ServiceResult<PokemonRecord> {
        for key in LookupKey::plan(term) {
            log::debug!("Looking up pokemon by {}", key);

            let found = match &key {
                LookupKey::No(no) => self.pokemon_repo.find_by_no(*no).await,
                LookupKey::Id(id) => self.pokemon_repo.find_by_id(*id).await,
                LookupKey::Name(name) => self.pokemon_repo.find_by_name(name).await,
            }
            .map_err(handle_exceptions)?;

            if let Some(record) = found {
                return Ok(record);
            }
        }

        Err(ServiceError::NotFound {
            term: term.to_string(),
        })
    }

    /// Patches without a name are not written; the resolved record comes
    /// back as-is.
    ///
    /// The returned record is the resolved one with the patch laid over it,
    /// not a fresh read from the store. Anything the store changes on its own
    /// (or a concurrent writer changes in between) is not reflected.
    pub async fn update(&self, term: &str, mut patch: UpdatePokemon) -> ServiceResult<PokemonRecord> {
        let record = self.find_one(term).await?;

        if !patch.has_name() {
            return Ok(record);
        }
        patch.name = patch.name.as_deref().map(normalize_name);

        self.pokemon_repo
            .update(record.id, &patch)
            .await
            .map_err(handle_exceptions)?;

        log::info!("Updated pokemon {}", record.id);
        Ok(record.merged_with(&patch))
    }

    pub async fn remove(&self, id: Uuid) -> ServiceResult<()> {
        let deleted = self
            .pokemon_repo
            .delete(id)
            .await
            .map_err(handle_exceptions)?;

        if deleted == 0 {
            return Err(ServiceError::InvalidRequest { id });
        }

        log::info!("Removed pokemon {}", id);
        Ok(())
    }
}

/// Duplicate keys become client errors; anything else is an internal
/// failure that keeps the store error as its cause.
fn handle_exceptions(error: AppError) -> ServiceError {
    match error {
        AppError::DuplicateKey(key_value) => {
            log::warn!("Pokemon exists in db {}", key_value);
            ServiceError::Duplicate { key_value }
        }
        other => {
            let mut chain = other.to_string();
            let mut cause = other.source();
            while let Some(inner) = cause {
                chain.push_str(": ");
                chain.push_str(&inner.to_string());
                cause = inner.source();
            }
            log::error!("Pokemon store failure: {}", chain);
            ServiceError::internal(other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyValue;
    use crate::repositories::MockPokemonRepository;
    use mockall::predicate::eq;
    use serde_json::Map;

    fn pokemon(no: u32, name: &str) -> PokemonRecord {
        PokemonRecord {
            id: Uuid::new_v4(),
            no: Some(no),
            name: name.to_string(),
            attributes: Map::new(),
        }
    }

    fn service(repo: MockPokemonRepository) -> PokemonService {
        PokemonService::new(Arc::new(repo), 7)
    }

    #[tokio::test]
    async fn test_create_lowercases_name() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_insert()
            .withf(|record: &PokemonRecord| record.name == "pikachu" && record.no == Some(25))
            .times(1)
            .returning(|_| Ok(()));

        let created = service(repo)
            .create(CreatePokemon {
                no: Some(25),
                name: "PikaChu".to_string(),
                attributes: Map::new(),
            })
            .await
            .unwrap();

        assert_eq!(created.name, "pikachu");
    }

    #[tokio::test]
    async fn test_create_duplicate_maps_to_duplicate() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_insert()
            .returning(|_| Err(AppError::DuplicateKey(KeyValue::new("no", 1))));

        let err = service(repo)
            .create(CreatePokemon {
                no: Some(1),
                name: "x".to_string(),
                attributes: Map::new(),
            })
            .await
            .unwrap_err();

        match err {
            ServiceError::Duplicate { key_value } => assert_eq!(key_value.key, "no"),
            other => panic!("expected duplicate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_storage_failure_maps_to_internal() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_insert()
            .returning(|_| Err(AppError::Pool("timed out".to_string())));

        let err = service(repo)
            .create(CreatePokemon {
                no: Some(1),
                name: "bulbasaur".to_string(),
                attributes: Map::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Internal {
                source: AppError::Pool(_)
            }
        ));
    }

    #[tokio::test]
    async fn test_find_all_uses_default_limit() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_list()
            .with(eq(7), eq(0))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let records = service(repo).find_all(Pagination::default()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_find_all_offset_is_a_page_index() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_list()
            .with(eq(2), eq(2))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        service(repo)
            .find_all(Pagination::new(Some(2), Some(1)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_one_numeric_term_never_reaches_name_on_hit() {
        let charizard = pokemon(6, "charizard");
        let expected = charizard.clone();

        let mut repo = MockPokemonRepository::new();
        repo.expect_find_by_no()
            .with(eq(6))
            .times(1)
            .returning(move |_| Ok(Some(charizard.clone())));
        repo.expect_find_by_name().times(0);

        let found = service(repo).find_one("6").await.unwrap();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_find_one_falls_back_to_name() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_find_by_no()
            .with(eq(151))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_find_by_name()
            .withf(|name: &str| name == "151")
            .times(1)
            .returning(|_| Ok(Some(pokemon(1, "151"))));

        let found = service(repo).find_one("151").await.unwrap();
        assert_eq!(found.name, "151");
    }

    #[tokio::test]
    async fn test_find_one_tries_identifier_before_name() {
        let record = pokemon(4, "charmander");
        let id = record.id;

        let mut repo = MockPokemonRepository::new();
        repo.expect_find_by_no().times(0);
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        repo.expect_find_by_name().times(0);

        let found = service(repo).find_one(&id.to_string()).await.unwrap();
        assert_eq!(found.id, id);
    }

    #[tokio::test]
    async fn test_find_one_miss_is_not_found() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_find_by_name()
            .withf(|name: &str| name == "missingno")
            .returning(|_| Ok(None));

        let err = service(repo).find_one(" MissingNo ").await.unwrap_err();
        match err {
            ServiceError::NotFound { term } => assert_eq!(term, " MissingNo "),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_one_storage_failure_is_internal() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_find_by_name()
            .returning(|_| Err(AppError::Other("disk gone".to_string())));

        let err = service(repo).find_one("pikachu").await.unwrap_err();
        assert!(matches!(err, ServiceError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_update_without_name_does_not_write() {
        let record = pokemon(25, "pikachu");
        let expected = record.clone();

        let mut repo = MockPokemonRepository::new();
        repo.expect_find_by_name()
            .returning(move |_| Ok(Some(record.clone())));
        repo.expect_update().times(0);

        let mut patch = UpdatePokemon::default();
        patch.no = Some(26);
        let returned = service(repo).update("pikachu", patch).await.unwrap();
        assert_eq!(returned, expected);
    }

    #[tokio::test]
    async fn test_update_returns_merged_view() {
        let record = pokemon(25, "pikachu");
        let id = record.id;

        let mut repo = MockPokemonRepository::new();
        repo.expect_find_by_no()
            .returning(move |_| Ok(Some(record.clone())));
        repo.expect_update()
            .withf(move |target: &Uuid, patch: &UpdatePokemon| {
                *target == id && patch.name.as_deref() == Some("raichu")
            })
            .times(1)
            .returning(|_, _| Ok(1));

        let patch = UpdatePokemon {
            name: Some("Raichu".to_string()),
            ..Default::default()
        };
        let returned = service(repo).update("25", patch).await.unwrap();
        assert_eq!(returned.id, id);
        assert_eq!(returned.name, "raichu");
        assert_eq!(returned.no, Some(25));
    }

    #[tokio::test]
    async fn test_update_unknown_term_propagates_not_found() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_update().times(0);

        let patch = UpdatePokemon {
            name: Some("mew".to_string()),
            ..Default::default()
        };
        let err = service(repo).update("nobody", patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_remove_nothing_deleted_is_invalid_request() {
        let id = Uuid::new_v4();
        let mut repo = MockPokemonRepository::new();
        repo.expect_delete().with(eq(id)).returning(|_| Ok(0));

        let err = service(repo).remove(id).await.unwrap_err();
        match err {
            ServiceError::InvalidRequest { id: missing } => assert_eq!(missing, id),
            other => panic!("expected invalid request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remove_existing() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_delete().returning(|_| Ok(1));

        service(repo).remove(Uuid::new_v4()).await.unwrap();
    }
}
