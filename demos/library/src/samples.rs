//! Canned entities mirroring typical backend payloads, shared by the tests
//! and the demo binary.

use crate::model_v1::{Author, Book, BookStatus, Category, Loan, Reader};
use chrono::NaiveDate;

pub fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 25).unwrap()
}

pub fn category_with_required_data() -> Category {
    Category { id: Some(8109), name: Some("midst croon cautiously".into()) }
}

pub fn category_with_partial_data() -> Category {
    Category { id: Some(15504), name: Some("dispose".into()) }
}

pub fn category_with_full_data() -> Category {
    Category { id: Some(28780), name: Some("ouch".into()) }
}

pub fn category_with_new_data() -> Category {
    Category { id: None, name: Some("where pfft regularly".into()) }
}

pub fn author_with_required_data() -> Author {
    Author { id: Some(24433), first_name: Some("Leonardo".into()), last_name: Some("Bednar".into()) }
}

pub fn author_with_partial_data() -> Author {
    Author { id: Some(12726), first_name: Some("Adriel".into()), last_name: Some("Kemmer".into()) }
}

pub fn author_with_full_data() -> Author {
    Author { id: Some(16232), first_name: Some("Jena".into()), last_name: Some("Beatty".into()) }
}

pub fn author_with_new_data() -> Author {
    Author { id: None, first_name: Some("Mossie".into()), last_name: Some("Tillman".into()) }
}

pub fn reader_with_required_data() -> Reader {
    Reader {
        id: Some(20850),
        first_name: Some("Laverne".into()),
        last_name: Some("Smith".into()),
        email: Some("Howell.Lang@hotmail.com".into()),
        joined_date: None,
    }
}

pub fn reader_with_partial_data() -> Reader {
    Reader {
        id: Some(26341),
        first_name: Some("Bernadine".into()),
        last_name: Some("Boyle".into()),
        email: Some("Emma_Zemlak41@gmail.com".into()),
        joined_date: Some(sample_date()),
    }
}

pub fn reader_with_full_data() -> Reader {
    Reader {
        id: Some(26816),
        first_name: Some("Anjali".into()),
        last_name: Some("Howell".into()),
        email: Some("Chauncey70@gmail.com".into()),
        joined_date: Some(sample_date()),
    }
}

pub fn reader_with_new_data() -> Reader {
    Reader {
        id: None,
        first_name: Some("Felicita".into()),
        last_name: Some("Graham".into()),
        email: Some("Emilia.Beier@hotmail.com".into()),
        joined_date: None,
    }
}

pub fn book_with_required_data() -> Book {
    Book {
        id: Some(3991),
        title: Some("blue regal".into()),
        publication_date: None,
        copies_owned: Some(21315),
        status: Some(BookStatus::Available),
        category: None,
        authors: vec![],
    }
}

pub fn book_with_partial_data() -> Book {
    Book {
        id: Some(20784),
        title: Some("blah legislature".into()),
        publication_date: None,
        copies_owned: Some(10868),
        status: Some(BookStatus::Borrowed),
        category: None,
        authors: vec![],
    }
}

pub fn book_with_full_data() -> Book {
    Book {
        id: Some(8637),
        title: Some("sniff".into()),
        publication_date: Some(sample_date()),
        copies_owned: Some(8807),
        status: Some(BookStatus::Borrowed),
        category: Some(category_with_full_data()),
        authors: vec![author_with_full_data()],
    }
}

pub fn book_with_new_data() -> Book {
    Book {
        id: None,
        title: Some("taxicab nor".into()),
        publication_date: None,
        copies_owned: Some(12703),
        status: Some(BookStatus::Unavailable),
        category: None,
        authors: vec![],
    }
}

pub fn loan_with_required_data() -> Loan {
    Loan { id: Some(12643), loan_date: Some(sample_date()), return_date: None, book: None, member: None }
}

pub fn loan_with_partial_data() -> Loan {
    Loan {
        id: Some(19895),
        loan_date: Some(sample_date()),
        return_date: Some(sample_date()),
        book: None,
        member: None,
    }
}

pub fn loan_with_full_data() -> Loan {
    Loan {
        id: Some(27230),
        loan_date: Some(sample_date()),
        return_date: Some(sample_date()),
        book: Some(book_with_required_data()),
        member: Some(reader_with_required_data()),
    }
}

pub fn loan_with_new_data() -> Loan {
    Loan { id: None, loan_date: Some(sample_date()), return_date: None, book: None, member: None }
}
