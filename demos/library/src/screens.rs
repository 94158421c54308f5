//! Edit screens for the five entities. Book and Loan carry relationship
//! option lists that are loaded concurrently and merged with whatever the
//! edited record already references; the other three are plain forms and
//! share one generic screen.

use crate::model_v1::{Author, Book, Category, Loan, Reader};
use formbit::{
    load_options, resolve, AppError, Entity, EntityId, Form, NavigateBack, Navigator, QueryOptions,
    Resolution, RestApi, SaveWorkflow, Saved, Transport,
};
use std::sync::Arc;

fn option_query() -> QueryOptions {
    QueryOptions::default().sorted_by("id,asc")
}

/// Book create/edit screen with category and author option lists.
pub struct BookEditScreen<T: Transport> {
    api: Arc<RestApi<T>>,
    pub form: Form<Book>,
    pub categories: Vec<Category>,
    pub authors: Vec<Author>,
    workflow: SaveWorkflow<Book>,
}

impl<T: Transport> BookEditScreen<T> {
    pub fn new(api: Arc<RestApi<T>>) -> Self {
        BookEditScreen {
            api,
            form: Form::new(),
            categories: Vec::new(),
            authors: Vec::new(),
            workflow: SaveWorkflow::new(),
        }
    }

    /// Route entry: resolves the record (when an id is present), rebinds the
    /// form and loads both option lists concurrently. Returns `false` when the
    /// record was absent and the navigator was already redirected.
    pub async fn activate(
        &mut self,
        navigator: &mut dyn Navigator,
        id: Option<EntityId>,
    ) -> Result<bool, AppError> {
        match resolve::<Book, _>(&self.api, navigator, id).await? {
            Resolution::Redirected => return Ok(false),
            Resolution::Found(book) => self.form.reset(&book),
            Resolution::New => self.form = Form::new(),
        }
        let book = self.form.raw_value();
        let query = option_query();
        let (categories, authors) = futures::try_join!(
            load_options(&self.api, &query, [book.category]),
            load_options(&self.api, &query, book.authors.into_iter().map(Some)),
        )?;
        self.categories = categories;
        self.authors = authors;
        Ok(true)
    }

    /// Rebinds the form to `book` and folds its references into the option
    /// lists so the current selection stays selectable.
    pub fn update_form(&mut self, book: &Book) {
        self.form.reset(book);
        self.categories = formbit::add_to_collection_if_missing(
            std::mem::take(&mut self.categories),
            [book.category.clone()],
        );
        self.authors = formbit::add_to_collection_if_missing(
            std::mem::take(&mut self.authors),
            book.authors.iter().cloned().map(Some),
        );
    }

    pub async fn save(&self, navigator: &mut dyn Navigator) -> Result<Saved<Book>, AppError> {
        let mut hooks = NavigateBack { navigator };
        self.workflow.save(&self.api, &self.form, &mut hooks).await
    }

    pub fn is_saving(&self) -> bool {
        self.workflow.is_saving()
    }
}

/// Loan create/edit screen with book and member option lists.
pub struct LoanEditScreen<T: Transport> {
    api: Arc<RestApi<T>>,
    pub form: Form<Loan>,
    pub books: Vec<Book>,
    pub members: Vec<Reader>,
    workflow: SaveWorkflow<Loan>,
}

impl<T: Transport> LoanEditScreen<T> {
    pub fn new(api: Arc<RestApi<T>>) -> Self {
        LoanEditScreen {
            api,
            form: Form::new(),
            books: Vec::new(),
            members: Vec::new(),
            workflow: SaveWorkflow::new(),
        }
    }

    pub async fn activate(
        &mut self,
        navigator: &mut dyn Navigator,
        id: Option<EntityId>,
    ) -> Result<bool, AppError> {
        match resolve::<Loan, _>(&self.api, navigator, id).await? {
            Resolution::Redirected => return Ok(false),
            Resolution::Found(loan) => self.form.reset(&loan),
            Resolution::New => self.form = Form::new(),
        }
        let loan = self.form.raw_value();
        let query = option_query();
        let (books, members) = futures::try_join!(
            load_options(&self.api, &query, [loan.book]),
            load_options(&self.api, &query, [loan.member]),
        )?;
        self.books = books;
        self.members = members;
        Ok(true)
    }

    pub fn update_form(&mut self, loan: &Loan) {
        self.form.reset(loan);
        self.books = formbit::add_to_collection_if_missing(
            std::mem::take(&mut self.books),
            [loan.book.clone()],
        );
        self.members = formbit::add_to_collection_if_missing(
            std::mem::take(&mut self.members),
            [loan.member.clone()],
        );
    }

    pub async fn save(&self, navigator: &mut dyn Navigator) -> Result<Saved<Loan>, AppError> {
        let mut hooks = NavigateBack { navigator };
        self.workflow.save(&self.api, &self.form, &mut hooks).await
    }

    pub fn is_saving(&self) -> bool {
        self.workflow.is_saving()
    }
}

/// Relationship-free screen shared by authors, categories and readers.
pub struct SimpleEditScreen<E: Entity, T: Transport> {
    api: Arc<RestApi<T>>,
    pub form: Form<E>,
    workflow: SaveWorkflow<E>,
}

impl<E: Entity, T: Transport> SimpleEditScreen<E, T> {
    pub fn new(api: Arc<RestApi<T>>) -> Self {
        SimpleEditScreen { api, form: Form::new(), workflow: SaveWorkflow::new() }
    }

    pub async fn activate(
        &mut self,
        navigator: &mut dyn Navigator,
        id: Option<EntityId>,
    ) -> Result<bool, AppError> {
        match resolve::<E, _>(&self.api, navigator, id).await? {
            Resolution::Redirected => Ok(false),
            Resolution::Found(entity) => {
                self.form.reset(&entity);
                Ok(true)
            }
            Resolution::New => {
                self.form = Form::new();
                Ok(true)
            }
        }
    }

    pub async fn save(&self, navigator: &mut dyn Navigator) -> Result<Saved<E>, AppError> {
        let mut hooks = NavigateBack { navigator };
        self.workflow.save(&self.api, &self.form, &mut hooks).await
    }

    pub fn is_saving(&self) -> bool {
        self.workflow.is_saving()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use formbit::test_support::{MemoryBackend, RecordingNavigator};
    use formbit::FieldState;

    fn seeded_backend() -> MemoryBackend {
        let backend = MemoryBackend::new();
        backend.seed("api/categories", serde_json::to_value(samples::category_with_required_data()).unwrap());
        backend.seed("api/categories", serde_json::to_value(samples::category_with_partial_data()).unwrap());
        backend.seed("api/authors", serde_json::to_value(samples::author_with_required_data()).unwrap());
        backend.seed("api/books", serde_json::to_value(samples::book_with_full_data()).unwrap());
        backend
    }

    #[tokio::test]
    async fn activating_an_edit_route_merges_attached_references_into_the_options() {
        let api = Arc::new(RestApi::new(seeded_backend()));
        let mut screen = BookEditScreen::new(api);
        let mut navigator = RecordingNavigator::default();

        let active = screen.activate(&mut navigator, Some(8637)).await.unwrap();
        assert!(active);
        assert_eq!(screen.form.id(), Some(8637));
        // The attached category (28780) is not in the backend list; it is
        // prepended rather than lost.
        let category_ids: Vec<_> = screen.categories.iter().filter_map(|c| c.id).collect();
        assert_eq!(category_ids, vec![28780, 8109, 15504]);
        // The attached author is already listed, so no duplicate appears.
        let author_ids: Vec<_> = screen.authors.iter().filter_map(|a| a.id).collect();
        assert_eq!(author_ids, vec![16232, 24433]);
    }

    #[tokio::test]
    async fn activating_a_create_route_loads_bare_option_lists() {
        let api = Arc::new(RestApi::new(seeded_backend()));
        let mut screen = BookEditScreen::new(api);
        let mut navigator = RecordingNavigator::default();

        let active = screen.activate(&mut navigator, None).await.unwrap();
        assert!(active);
        assert_eq!(screen.form.id(), None);
        assert_eq!(screen.categories.len(), 2);
        assert!(navigator.events.is_empty());
    }

    #[tokio::test]
    async fn activating_a_missing_record_redirects_and_deactivates() {
        let api = Arc::new(RestApi::new(seeded_backend()));
        let mut screen = BookEditScreen::new(api);
        let mut navigator = RecordingNavigator::default();

        let active = screen.activate(&mut navigator, Some(424242)).await.unwrap();
        assert!(!active);
        assert_eq!(navigator.events, vec!["not_found"]);
    }

    #[tokio::test]
    async fn saving_a_new_author_navigates_back() {
        let api = Arc::new(RestApi::new(MemoryBackend::new()));
        let mut screen = SimpleEditScreen::<Author, _>::new(Arc::clone(&api));
        let mut navigator = RecordingNavigator::default();

        screen.activate(&mut navigator, None).await.unwrap();
        assert_eq!(screen.form.field_state("firstName"), FieldState::Pristine);
        screen.form.apply(|a| {
            a.first_name = Some("Mossie".into());
            a.last_name = Some("Tillman".into());
        });
        let saved = screen.save(&mut navigator).await.unwrap();
        assert!(matches!(saved, Saved::Created(_)));
        assert!(saved.entity().id.is_some());
        assert_eq!(navigator.events, vec!["back"]);
    }

    #[tokio::test]
    async fn update_form_folds_new_references_into_the_loaded_lists() {
        let api = Arc::new(RestApi::new(seeded_backend()));
        let mut screen = LoanEditScreen::new(api);
        let mut navigator = RecordingNavigator::default();
        screen.activate(&mut navigator, None).await.unwrap();
        assert_eq!(screen.books.len(), 1);

        screen.update_form(&samples::loan_with_full_data());
        // The loan references book 3991 which the backend never listed.
        let book_ids: Vec<_> = screen.books.iter().filter_map(|b| b.id).collect();
        assert_eq!(book_ids, vec![3991, 8637]);
        let member_ids: Vec<_> = screen.members.iter().filter_map(|m| m.id).collect();
        assert_eq!(member_ids, vec![20850]);
    }
}
