//! # Admin Controller
//!
//! Book and category management: the two edit forms and their CRUD calls.
//!
//! ## Book Form Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open_book_form(None) ──► show, editing = None, blank draft dated today │
//! │  open_book_form(Some(b)) ► show, editing = b, draft = b with YYYY-MM-DD │
//! │                                                                         │
//! │  save_book()                                                            │
//! │    editing = Some(b) ──► PUT Books/{id}                                 │
//! │                          ok  ► replace in books, "Book Updated"         │
//! │                          err ► "Update Failed"                          │
//! │    editing = None ─────► categoryId ≤ 0 ► "Invalid Category", no call   │
//! │                          POST Books                                     │
//! │                          ok  ► reload books, "Book Created"             │
//! │                          err ► "Create Failed"                          │
//! │    on success: editing = None, draft reset (form stays open)            │
//! │                                                                         │
//! │  cancel_book_edit() ──► hide, editing = None, draft reset               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The category form mirrors this without the category check.

use bookstore_core::{Book, Category};
use tracing::{debug, error, warn};

use super::StateView;
use crate::state::BookstoreState;
use crate::ui::ConfirmationOptions;
use crate::Storefront;

#[derive(Debug)]
pub struct AdminController {
    view: StateView,
}

impl AdminController {
    pub fn new(store: &mut Storefront) -> Self {
        AdminController {
            view: StateView::attach(store),
        }
    }

    pub async fn load(&mut self, store: &mut Storefront) {
        super::load_books(store).await;
        super::load_categories(store).await;
    }

    pub fn view(&mut self) -> &BookstoreState {
        self.view.sync()
    }

    pub fn dispose(self) {
        self.view.dispose();
    }

    // =========================================================================
    // Book Form
    // =========================================================================

    /// Shows the book form, blank or prefilled from `book`.
    pub fn open_book_form(&mut self, store: &mut Storefront, book: Option<&Book>) {
        let state = store.state_mut();
        state.set_show_book_form(true);

        match book {
            Some(book) => {
                state.set_editing_book(Some(book.clone()));
                let draft = Book {
                    publish_date: book.publish_day().to_string(),
                    ..book.clone()
                };
                state.set_book_form(draft);
            }
            None => {
                state.set_editing_book(None);
                state.reset_book_form();
            }
        }
    }

    /// Starts editing `book` with its fields copied as-is.
    pub fn edit_book(&mut self, store: &mut Storefront, book: &Book) {
        let state = store.state_mut();
        state.set_editing_book(Some(book.clone()));
        state.set_book_form(book.clone());
        state.set_show_book_form(true);
    }

    pub fn cancel_book_edit(&mut self, store: &mut Storefront) {
        let state = store.state_mut();
        state.set_show_book_form(false);
        state.set_editing_book(None);
        state.reset_book_form();
    }

    /// Creates or updates from the current draft. Returns whether the API
    /// accepted it.
    pub async fn save_book(&mut self, store: &mut Storefront) -> bool {
        let form = store.state().book_form().clone();
        debug!(name = %form.name, "Submitting book form");

        match store.state().editing_book().and_then(|b| b.id) {
            Some(id) => self.update_book(store, id, form).await,
            None => self.create_book(store, form).await,
        }
    }

    async fn update_book(&mut self, store: &mut Storefront, id: i64, form: Book) -> bool {
        let result = store.catalog().books().update(id, &form).await;
        match result {
            Ok(updated) => {
                let name = updated.name.clone();
                let state = store.state_mut();
                state.update_book_in_books(id, updated);
                state.set_editing_book(None);
                state.reset_book_form();
                store.notifier().success(
                    "Book Updated",
                    &format!("Book \"{}\" has been updated successfully.", name),
                );
                true
            }
            Err(e) => {
                error!(book_id = id, error = %e, "Error updating book");
                store
                    .notifier()
                    .error("Update Failed", "Failed to update book. Please try again.");
                false
            }
        }
    }

    async fn create_book(&mut self, store: &mut Storefront, form: Book) -> bool {
        if form.category_id <= 0 {
            store.notifier().warning(
                "Invalid Category",
                "Please select a valid category before saving the book.",
            );
            return false;
        }

        let result = store.catalog().books().create(&form).await;
        match result {
            Ok(created) => {
                debug!(book_id = ?created.id, "Book created");
                super::load_books(store).await;
                let state = store.state_mut();
                state.set_editing_book(None);
                state.reset_book_form();
                store
                    .notifier()
                    .success("Book Created", "Book has been created successfully.");
                true
            }
            Err(e) => {
                error!(error = %e, "Error creating book");
                store
                    .notifier()
                    .error("Create Failed", "Failed to create book. Please try again.");
                false
            }
        }
    }

    /// Asks, then deletes book `id` and reloads the list.
    pub async fn delete_book(&mut self, store: &mut Storefront, id: i64) -> bool {
        let name = self
            .view
            .sync()
            .books
            .iter()
            .find(|b| b.id == Some(id))
            .map(|b| b.name.clone());

        let answer = store
            .confirmer()
            .confirm(ConfirmationOptions::delete(name.as_deref()))
            .await;
        if !answer.confirmed {
            debug!(book_id = id, "Book deletion cancelled");
            return false;
        }

        let result = store.catalog().books().delete(id).await;
        match result {
            Ok(()) => {
                super::load_books(store).await;
                store.notifier().success(
                    "Book Deleted",
                    &format!(
                        "Book \"{}\" has been deleted successfully.",
                        name.as_deref().unwrap_or("this book")
                    ),
                );
                true
            }
            Err(e) => {
                error!(book_id = id, error = %e, "Error deleting book");
                store
                    .notifier()
                    .error("Delete Failed", "Failed to delete book. Please try again.");
                false
            }
        }
    }

    // =========================================================================
    // Category Form
    // =========================================================================

    pub fn open_category_form(&mut self, store: &mut Storefront, category: Option<&Category>) {
        let state = store.state_mut();
        state.set_show_category_form(true);

        match category {
            Some(category) => {
                state.set_editing_category(Some(category.clone()));
                state.set_category_form(category.clone());
            }
            None => {
                state.set_editing_category(None);
                state.reset_category_form();
            }
        }
    }

    pub fn edit_category(&mut self, store: &mut Storefront, category: &Category) {
        self.open_category_form(store, Some(category));
    }

    pub fn cancel_category_edit(&mut self, store: &mut Storefront) {
        let state = store.state_mut();
        state.set_show_category_form(false);
        state.set_editing_category(None);
        state.reset_category_form();
    }

    /// Creates or updates from the category draft, then closes the form.
    pub async fn save_category(&mut self, store: &mut Storefront) -> bool {
        let form = store.state().category_form().clone();
        let editing_id = store.state().editing_category().and_then(|c| c.id);

        let (verb, result) = match editing_id {
            Some(id) => ("updated", store.catalog().categories().update(id, &form).await),
            None => ("created", store.catalog().categories().create(&form).await),
        };

        match result {
            Ok(_) => {
                super::load_categories(store).await;
                self.cancel_category_edit(store);
                let title = if editing_id.is_some() {
                    "Category Updated"
                } else {
                    "Category Created"
                };
                store.notifier().success(
                    title,
                    &format!("Category \"{}\" has been {} successfully.", form.name, verb),
                );
                true
            }
            Err(e) => {
                error!(category_id = ?editing_id, error = %e, "Error saving category");
                let (title, action) = if editing_id.is_some() {
                    ("Update Failed", "update")
                } else {
                    ("Create Failed", "create")
                };
                store.notifier().error(
                    title,
                    &format!("Failed to {} category. Please try again.", action),
                );
                false
            }
        }
    }

    /// Asks, then deletes category `id` and reloads the list.
    pub async fn delete_category(&mut self, store: &mut Storefront, id: i64) -> bool {
        let name = self
            .view
            .sync()
            .categories
            .iter()
            .find(|c| c.id == Some(id))
            .map(|c| c.name.clone());
        if name.is_none() {
            warn!(category_id = id, "Deleting a category that isn't loaded");
        }

        let answer = store
            .confirmer()
            .confirm(ConfirmationOptions::delete(name.as_deref()))
            .await;
        if !answer.confirmed {
            return false;
        }

        let result = store.catalog().categories().delete(id).await;
        match result {
            Ok(()) => {
                super::load_categories(store).await;
                store.notifier().success(
                    "Category Deleted",
                    &format!(
                        "Category \"{}\" has been deleted successfully.",
                        name.as_deref().unwrap_or("this category")
                    ),
                );
                true
            }
            Err(e) => {
                error!(category_id = id, error = %e, "Error deleting category");
                store
                    .notifier()
                    .error("Delete Failed", "Failed to delete category. Please try again.");
                false
            }
        }
    }
}
