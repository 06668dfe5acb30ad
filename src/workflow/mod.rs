pub mod question_set;

pub use question_set::{
    fetch_book_data, generate_set, generate_set_with_rng, get_questions, get_questions_with_rng,
};
