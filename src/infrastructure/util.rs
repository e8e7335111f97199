use crate::application::ports::util::SlugGenerator;
use slug::slugify;

/// Transliterates to ASCII, lower-cases and joins words with single hyphens.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliterates_and_collapses_separators() {
        let slugger = DefaultSlugGenerator;
        assert_eq!(slugger.slugify("Hello World"), "hello-world");
        assert_eq!(slugger.slugify("  Café -- Déjà vu!  "), "cafe-deja-vu");
        assert_eq!(slugger.slugify("!!!"), "");
    }
}
