/*
    Membership testing for grammars in Chomsky Normal Form
*/

pub mod engine;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
