//! Category Service - hierarchy resolution, slugs, dual write

use axum_helpers::Paginated;
use core_ai::ContentGenerator;
use search::{SearchMirror, SearchQuery, order_by_ids};
use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::hierarchy::Hierarchy;
use crate::models::{
    Category, CategoryDocument, CategoryFilter, CategoryInput, SuggestionRequest,
    SuggestionResponse,
};
use crate::repository::CategoryRepository;
use crate::{seo, slug};

const SEARCH_FIELDS: &[&str] = &["name"];

/// Numbered slug candidates tried before falling back to a random suffix
const MAX_NUMBERED_SLUGS: u32 = 20;

pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
    search: SearchMirror,
    generator: Option<Arc<dyn ContentGenerator>>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R, search: SearchMirror) -> Self {
        Self {
            repository: Arc::new(repository),
            search,
            generator: None,
        }
    }

    /// Enable `POST /categories/suggestions`.
    pub fn with_generator(mut self, generator: Arc<dyn ContentGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Compute level, ancestors and path for `name` under `parent_id`.
    ///
    /// An unknown parent falls back to a root position. `editing` is the id of
    /// the category being updated; choosing itself or a descendant as parent
    /// is rejected.
    #[instrument(skip(self))]
    pub async fn resolve_hierarchy(
        &self,
        name: &str,
        parent_id: Option<&str>,
        editing: Option<Uuid>,
    ) -> CategoryResult<Hierarchy> {
        let Some(raw) = parent_id else {
            return Ok(Hierarchy::root(name));
        };
        let parent_id =
            Uuid::parse_str(raw).map_err(|_| CategoryError::InvalidId(raw.to_string()))?;

        if editing == Some(parent_id) {
            return Err(CategoryError::Cycle {
                category: parent_id,
                parent: parent_id,
            });
        }

        match self.repository.get_by_id(parent_id).await? {
            Some(parent) => {
                if let Some(id) = editing {
                    if Hierarchy::would_cycle(id, &parent) {
                        return Err(CategoryError::Cycle {
                            category: id,
                            parent: parent.id,
                        });
                    }
                }
                Ok(Hierarchy::child_of(&parent, name))
            }
            None => {
                warn!(%parent_id, "Parent category not found, storing as root");
                Ok(Hierarchy::root(name))
            }
        }
    }

    async fn unique_slug(&self, name: &str, exclude: Option<Uuid>) -> CategoryResult<String> {
        let base = slug::slugify(name);
        for attempt in 1..=MAX_NUMBERED_SLUGS {
            let candidate = slug::with_suffix(&base, attempt);
            if !self.repository.exists_by_slug(&candidate, exclude).await? {
                return Ok(candidate);
            }
        }
        // The unique slug index still rejects the rare clash here.
        Ok(slug::with_random_suffix(&base))
    }

    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        filter: CategoryFilter,
    ) -> CategoryResult<Paginated<Category>> {
        let query = SearchQuery::new()
            .text(filter.search.as_deref(), SEARCH_FIELDS)
            .term_opt("publish", filter.publish)
            .paginate(filter.page, filter.limit);

        match self.search.search(&query).await {
            Ok(hits) => {
                let ids: Vec<Uuid> = hits.parsed_ids();
                let records = self.repository.get_many(&ids).await?;
                Ok(Paginated::new(
                    filter.page,
                    filter.limit,
                    hits.total,
                    order_by_ids(&ids, records, |c| c.id),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Category search unavailable, listing from database");
                let total = self.repository.count(&filter).await?;
                let records = self.repository.list(&filter).await?;
                Ok(Paginated::new(filter.page, filter.limit, total, records))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CategoryInput) -> CategoryResult<Category> {
        let hierarchy = self
            .resolve_hierarchy(&input.name, input.parent_ref(), None)
            .await?;
        let slug = self.unique_slug(&input.name, None).await?;

        let category = self
            .repository
            .create(Category::new(input, hierarchy, slug))
            .await?;

        self.search
            .index_document(&category.id.to_string(), &CategoryDocument::from(&category))
            .await;
        Ok(category)
    }

    /// Full replace. Descendants keep their stored hierarchy.
    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: CategoryInput,
    ) -> CategoryResult<Category> {
        let mut category = self.get_category(id).await?;

        let hierarchy = self
            .resolve_hierarchy(&input.name, input.parent_ref(), Some(id))
            .await?;
        let slug = if input.name == category.name {
            category.slug.clone()
        } else {
            self.unique_slug(&input.name, Some(id)).await?
        };

        category.replace_with(input, hierarchy, slug);
        let category = self.repository.replace(category).await?;

        self.search
            .upsert_document(&category.id.to_string(), &CategoryDocument::from(&category))
            .await;
        Ok(category)
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CategoryResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(id));
        }
        self.search.remove(&id.to_string()).await;
        Ok(())
    }

    #[instrument(skip(self, request), fields(category_name = %request.name))]
    pub async fn suggest(&self, request: SuggestionRequest) -> CategoryResult<SuggestionResponse> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(CategoryError::AiNotConfigured)?;

        let scores = seo::score(&request);
        let text = generator.generate(&seo::prompt(&request)).await?;

        Ok(SuggestionResponse {
            suggestions: seo::parse_suggestions(&text),
            scores,
        })
    }
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            search: self.search.clone(),
            generator: self.generator.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SEARCH_INDEX;
    use crate::repository::{InMemoryCategoryRepository, MockCategoryRepository};
    use search::{InMemorySearchIndex, SearchCall};

    fn service() -> (CategoryService<InMemoryCategoryRepository>, InMemorySearchIndex) {
        let index = InMemorySearchIndex::new();
        let mirror = SearchMirror::new(Arc::new(index.clone()), SEARCH_INDEX);
        (
            CategoryService::new(InMemoryCategoryRepository::new(), mirror),
            index,
        )
    }

    fn input(name: &str, parent: Option<Uuid>) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            parent_id: parent.map(|id| id.to_string()),
            publish: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_root_and_child() {
        let (service, index) = service();

        let electronics = service.create_category(input("Electronics", None)).await.unwrap();
        assert_eq!(electronics.level, 0);
        assert!(electronics.ancestors.is_empty());
        assert_eq!(electronics.path, "Electronics");

        let phones = service
            .create_category(input("Phones", Some(electronics.id)))
            .await
            .unwrap();
        assert_eq!(phones.level, 1);
        assert_eq!(phones.ancestors, vec![electronics.id]);
        assert_eq!(phones.path, "Electronics>Phones");
        assert_eq!(phones.parent_id, Some(electronics.id));

        let doc = index
            .document(SEARCH_INDEX, &phones.id.to_string())
            .await
            .unwrap();
        assert_eq!(doc["path"], "Electronics>Phones");
    }

    #[tokio::test]
    async fn test_unknown_parent_falls_back_to_root() {
        let (service, _) = service();
        let category = service
            .create_category(input("Orphan", Some(Uuid::now_v7())))
            .await
            .unwrap();
        assert_eq!(category.level, 0);
        assert_eq!(category.path, "Orphan");
        assert!(category.parent_id.is_none());
    }

    #[tokio::test]
    async fn test_malformed_parent_skips_lookup() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_get_by_id().never();

        let mirror = SearchMirror::new(Arc::new(InMemorySearchIndex::new()), SEARCH_INDEX);
        let service = CategoryService::new(repo, mirror);

        let err = service
            .resolve_hierarchy("Phones", Some("not-a-uuid"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::InvalidId(id) if id == "not-a-uuid"));
    }

    #[tokio::test]
    async fn test_update_rejects_cycles() {
        let (service, _) = service();
        let root = service.create_category(input("Root", None)).await.unwrap();
        let child = service
            .create_category(input("Child", Some(root.id)))
            .await
            .unwrap();

        let err = service
            .update_category(root.id, input("Root", Some(root.id)))
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::Cycle { .. }));

        let err = service
            .update_category(root.id, input("Root", Some(child.id)))
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::Cycle { .. }));
    }

    #[tokio::test]
    async fn test_update_recomputes_hierarchy() {
        let (service, index) = service();
        let a = service.create_category(input("A", None)).await.unwrap();
        let b = service.create_category(input("B", None)).await.unwrap();

        let moved = service
            .update_category(b.id, input("B2", Some(a.id)))
            .await
            .unwrap();
        assert_eq!(moved.level, 1);
        assert_eq!(moved.path, "A>B2");
        assert_eq!(moved.slug, "b2");
        assert_eq!(moved.created_at, b.created_at);

        assert!(index.calls().await.contains(&SearchCall::Upsert {
            index: SEARCH_INDEX.into(),
            id: b.id.to_string()
        }));
    }

    #[tokio::test]
    async fn test_slug_clash_gets_suffix() {
        let (service, _) = service();
        let first = service.create_category(input("Phones", None)).await.unwrap();
        let second = service.create_category(input("phones!", None)).await.unwrap();
        assert_eq!(first.slug, "phones");
        assert_eq!(second.slug, "phones-2");
    }

    #[tokio::test]
    async fn test_busy_slug_stops_after_numbered_attempts() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_exists_by_slug()
            .times(MAX_NUMBERED_SLUGS as usize)
            .returning(|_, _| Ok(true));

        let mirror = SearchMirror::new(Arc::new(InMemorySearchIndex::new()), SEARCH_INDEX);
        let service = CategoryService::new(repo, mirror);

        let candidate = service.unique_slug("Phones", None).await.unwrap();
        assert!(candidate.starts_with("phones-"));
        assert_ne!(candidate, format!("phones-{}", MAX_NUMBERED_SLUGS + 1));
        assert_eq!(candidate, slug::slugify(&candidate));
    }

    #[tokio::test]
    async fn test_delete_missing_skips_search() {
        let (service, index) = service();
        let err = service.delete_category(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, CategoryError::NotFound(_)));
        assert!(index.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_outage_does_not_fail_create_and_list_falls_back() {
        let (service, index) = service();
        index.set_unavailable(true);

        service.create_category(input("Shoes", None)).await.unwrap();
        service.create_category(input("Boots", None)).await.unwrap();

        let page = service
            .list_categories(CategoryFilter {
                search: Some("sho".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].name, "Shoes");
    }

    #[tokio::test]
    async fn test_list_preserves_search_order() {
        let (service, _) = service();
        let names = ["Alpha", "Beta", "Gamma"];
        let mut created = Vec::new();
        for name in names {
            created.push(service.create_category(input(name, None)).await.unwrap());
        }

        let page = service.list_categories(CategoryFilter::default()).await.unwrap();
        assert_eq!(page.total, 3);
        let ids: Vec<Uuid> = page.data.iter().map(|c| c.id).collect();
        let expected: Vec<Uuid> = created.iter().map(|c| c.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_suggest_without_generator() {
        let (service, _) = service();
        let err = service
            .suggest(SuggestionRequest {
                name: "Shoes".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::AiNotConfigured));
    }
}
