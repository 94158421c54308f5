//! The lending-library domain: five entities, each a serde struct that
//! doubles as its own wire record (dates through [`Ymd`]) plus a declarative
//! [`EntitySpec`] descriptor feeding the generic engine.

use chrono::NaiveDate;
use formbit::{Entity, EntityId, EntitySpec, FieldSpec, FieldValue, Identified, Rule, Ymd};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::serde_as;

/// The backend serializes an absent relationship list as `null`; the client
/// treats that the same as an empty one.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let parsed = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(parsed.unwrap_or_default())
}

macro_rules! impl_entity {
    ($entity:ident, $spec:ident) => {
        impl Identified for $entity {
            fn id(&self) -> Option<EntityId> {
                self.id
            }
        }

        impl Entity for $entity {
            fn spec() -> &'static EntitySpec<Self> {
                &$spec
            }

            fn set_id(&mut self, id: Option<EntityId>) {
                self.id = id;
            }
        }
    };
}

// ---------- Category ----------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Option<EntityId>,
    pub name: Option<String>,
}

static CATEGORY_SPEC: Lazy<EntitySpec<Category>> = Lazy::new(|| EntitySpec {
    name: "category",
    resource: "api/categories",
    seed: Category::default,
    fields: vec![FieldSpec {
        name: "name",
        rules: &[Rule::Required],
        value: |c| FieldValue::Text(c.name.clone()),
    }],
});

impl_entity!(Category, CATEGORY_SPEC);

// ---------- Author ----------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Option<EntityId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

static AUTHOR_SPEC: Lazy<EntitySpec<Author>> = Lazy::new(|| EntitySpec {
    name: "author",
    resource: "api/authors",
    seed: Author::default,
    fields: vec![
        FieldSpec {
            name: "firstName",
            rules: &[Rule::Required],
            value: |a| FieldValue::Text(a.first_name.clone()),
        },
        FieldSpec {
            name: "lastName",
            rules: &[Rule::Required],
            value: |a| FieldValue::Text(a.last_name.clone()),
        },
    ],
});

impl_entity!(Author, AUTHOR_SPEC);

// ---------- Reader ----------

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reader {
    pub id: Option<EntityId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    #[serde_as(as = "Option<Ymd>")]
    pub joined_date: Option<NaiveDate>,
}

static READER_SPEC: Lazy<EntitySpec<Reader>> = Lazy::new(|| EntitySpec {
    name: "reader",
    resource: "api/readers",
    seed: Reader::default,
    fields: vec![
        FieldSpec {
            name: "firstName",
            rules: &[Rule::Required],
            value: |r| FieldValue::Text(r.first_name.clone()),
        },
        FieldSpec {
            name: "lastName",
            rules: &[Rule::Required],
            value: |r| FieldValue::Text(r.last_name.clone()),
        },
        FieldSpec {
            name: "email",
            rules: &[Rule::Required],
            value: |r| FieldValue::Text(r.email.clone()),
        },
        FieldSpec {
            name: "joinedDate",
            rules: &[],
            value: |r| FieldValue::Date(r.joined_date),
        },
    ],
});

impl_entity!(Reader, READER_SPEC);

// ---------- Book ----------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookStatus {
    Available,
    Borrowed,
    Unavailable,
}

impl BookStatus {
    pub const VALUES: [BookStatus; 3] =
        [BookStatus::Available, BookStatus::Borrowed, BookStatus::Unavailable];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "AVAILABLE",
            BookStatus::Borrowed => "BORROWED",
            BookStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Option<EntityId>,
    pub title: Option<String>,
    #[serde(default)]
    #[serde_as(as = "Option<Ymd>")]
    pub publication_date: Option<NaiveDate>,
    pub copies_owned: Option<i64>,
    pub status: Option<BookStatus>,
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub authors: Vec<Author>,
}

static BOOK_SPEC: Lazy<EntitySpec<Book>> = Lazy::new(|| EntitySpec {
    name: "book",
    resource: "api/books",
    seed: Book::default,
    fields: vec![
        FieldSpec {
            name: "title",
            rules: &[Rule::Required],
            value: |b| FieldValue::Text(b.title.clone()),
        },
        FieldSpec {
            name: "publicationDate",
            rules: &[],
            value: |b| FieldValue::Date(b.publication_date),
        },
        FieldSpec {
            name: "copiesOwned",
            rules: &[Rule::Required, Rule::Min(0)],
            value: |b| FieldValue::Int(b.copies_owned),
        },
        FieldSpec {
            name: "status",
            rules: &[Rule::Required],
            value: |b| FieldValue::Choice(b.status.map(|s| s.as_str().to_string())),
        },
        FieldSpec {
            name: "category",
            rules: &[],
            value: |b| FieldValue::Reference(b.category.as_ref().and_then(|c| c.id)),
        },
        FieldSpec {
            name: "authors",
            rules: &[],
            value: |b| FieldValue::References(b.authors.iter().filter_map(|a| a.id).collect()),
        },
    ],
});

impl_entity!(Book, BOOK_SPEC);

// ---------- Loan ----------

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: Option<EntityId>,
    #[serde(default)]
    #[serde_as(as = "Option<Ymd>")]
    pub loan_date: Option<NaiveDate>,
    #[serde(default)]
    #[serde_as(as = "Option<Ymd>")]
    pub return_date: Option<NaiveDate>,
    pub book: Option<Book>,
    pub member: Option<Reader>,
}

static LOAN_SPEC: Lazy<EntitySpec<Loan>> = Lazy::new(|| EntitySpec {
    name: "loan",
    resource: "api/loans",
    seed: Loan::default,
    fields: vec![
        FieldSpec {
            name: "loanDate",
            rules: &[Rule::Required],
            value: |l| FieldValue::Date(l.loan_date),
        },
        FieldSpec {
            name: "returnDate",
            rules: &[],
            value: |l| FieldValue::Date(l.return_date),
        },
        FieldSpec {
            name: "book",
            rules: &[],
            value: |l| FieldValue::Reference(l.book.as_ref().and_then(|b| b.id)),
        },
        FieldSpec {
            name: "member",
            rules: &[],
            value: |l| FieldValue::Reference(l.member.as_ref().and_then(|m| m.id)),
        },
    ],
});

impl_entity!(Loan, LOAN_SPEC);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use formbit::{eq_by_id, evaluate, Entity};

    #[test]
    fn book_round_trips_through_its_wire_record() {
        let book = samples::book_with_full_data();
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["publicationDate"], "2025-01-25");
        assert_eq!(json["status"], "BORROWED");
        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn loan_dates_cross_the_wire_as_fixed_format_strings() {
        let loan = samples::loan_with_partial_data();
        let json = serde_json::to_value(&loan).unwrap();
        assert_eq!(json["loanDate"], "2025-01-25");
        assert_eq!(json["returnDate"], "2025-01-25");
        let back: Loan = serde_json::from_value(json).unwrap();
        assert_eq!(back.loan_date, loan.loan_date);
    }

    #[test]
    fn a_null_author_list_collapses_to_empty() {
        let book: Book = serde_json::from_value(serde_json::json!({
            "id": 1, "title": "sniff", "authors": null
        }))
        .unwrap();
        assert!(book.authors.is_empty());
    }

    #[test]
    fn comparator_matches_categories_by_id_only() {
        let a = Category { id: Some(8109), name: Some("midst croon cautiously".into()) };
        let b = Category { id: Some(8109), name: Some("renamed".into()) };
        assert!(eq_by_id(Some(&a), Some(&b)));
        assert!(!eq_by_id(Some(&a), None::<&Category>));
    }

    #[test]
    fn book_descriptor_enforces_the_declared_rules() {
        let seeded = (Book::spec().seed)();
        let fields: Vec<_> = evaluate(Book::spec(), &seeded).iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["title", "copiesOwned", "status"]);

        let mut negative = samples::book_with_required_data();
        negative.copies_owned = Some(-1);
        let violations = evaluate(Book::spec(), &negative);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "min");
    }

    #[test]
    fn loan_requires_only_its_loan_date() {
        let seeded = (Loan::spec().seed)();
        let fields: Vec<_> = evaluate(Loan::spec(), &seeded).iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["loanDate"]);
    }

    #[test]
    fn resources_follow_the_plural_path_convention() {
        assert_eq!(Book::resource(), "api/books");
        assert_eq!(Category::resource(), "api/categories");
        assert_eq!(Author::resource(), "api/authors");
        assert_eq!(Reader::resource(), "api/readers");
        assert_eq!(Loan::resource(), "api/loans");
    }
}
