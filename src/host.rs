//! Generators of host names, composed only out of maps, filters and collections.
use crate::{
    generate::Generate,
    prelude::{any, same, unify},
};

fn alphanumeric() -> impl Generate<Item = char> + Clone {
    unify(any(('a'..='z', '0'..='9')))
}

fn hyphenated() -> impl Generate<Item = char> + Clone {
    unify(any(('a'..='z', '0'..='9', same('-'))))
}

/// Generates a single label of a domain: an alphanumeric character, optionally
/// followed by alphanumeric characters or hyphens and a final alphanumeric
/// character, at most 63 characters long.
pub fn subdomain() -> impl Generate<Item = String> + Clone {
    let middle = (hyphenated().collect_with::<_, String>(..=61usize), alphanumeric());
    let tail = unify::<_, Option<(String, char)>>(any((same(None), middle.map(Some))));
    (alphanumeric(), tail)
        .map(|(first, tail)| match tail {
            Some((middle, last)) => format!("{first}{middle}{last}"),
            None => first.to_string(),
        })
        .filter(|subdomain| subdomain.len() <= 63)
}

/// Generates domain names with an extension of at least two lowercase letters,
/// at most 255 characters long.
///
/// ```
/// # use falsify::*;
/// host::domain()
///     .check(|domain| domain.split('.').count() >= 2)
///     .assert();
/// ```
pub fn domain() -> impl Generate<Item = String> + Clone {
    let extension = ('a'..='z').collect_with::<_, String>(2..=10usize);
    (subdomain().collect_with::<_, Vec<_>>(1..=5usize), extension)
        .map(|(subdomains, extension)| format!("{}.{extension}", subdomains.join(".")))
        .filter(|domain| domain.len() <= 255)
}

/// Generates the user information part of a URL authority, where characters
/// outside of the allowed set are percent-encoded.
pub fn user_information() -> impl Generate<Item = String> + Clone {
    const OTHERS: [char; 16] = [
        '-', '.', '_', '~', '!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=', ':',
    ];
    let encoded = Generate::map(0u8..=u8::MAX, |byte| format!("%{byte:02X}"));
    let plain = unify::<_, char>(any((
        'a'..='z',
        'A'..='Z',
        '0'..='9',
        any(OTHERS).map(|other| other.unwrap_or('-')),
    )))
    .map(String::from);
    unify::<_, String>(any((plain, encoded)))
        .collect_with::<_, Vec<_>>(..=32usize)
        .map(|parts| parts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Sizes, State};

    #[test]
    fn subdomains_are_well_formed() {
        let generator = subdomain();
        for index in 0..200 {
            let mut state = State::random(index, 200, Sizes::DEFAULT, 4);
            let item = crate::shrink::Shrink::item(&generator.generate(&mut state).unwrap());
            assert!(!item.is_empty() && item.len() <= 63);
            assert!(!item.starts_with('-') && !item.ends_with('-'));
            assert!(item.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
