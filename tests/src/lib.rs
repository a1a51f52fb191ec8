#![cfg(test)]

mod access;
mod mocks;
