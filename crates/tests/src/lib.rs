#[cfg(test)]
mod common;

#[cfg(test)]
mod guard_tests;

#[cfg(test)]
mod backend_client_tests;
