extern crate self as clampsite_di;

pub use clampsite_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

/// A provider owns the root values of a dependency graph and caches every
/// value built from them, so each type is built at most once.
pub trait Provider: Sized {
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provides: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provides for P {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Greeting(&'static str);

    #[derive(Debug, Clone, Build)]
    struct Greeter {
        greeting: Greeting,
        #[state]
        calls: std::rc::Rc<std::cell::Cell<usize>>,
    }

    provider! {
        TestProvider { greeting: Greeting, }
    }

    #[test]
    fn provide_builds_from_fields() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            greeting: Greeting("hello"),
        };

        let greeter: Greeter = provider.provide();

        assert_eq!(greeter.greeting, Greeting("hello"));
    }

    #[test]
    fn provide_caches_built_values() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            greeting: Greeting("hello"),
        };

        let a: Greeter = provider.provide();
        a.calls.set(3);
        let b: Greeter = provider.provide();

        assert_eq!(b.calls.get(), 3);
    }

    #[derive(Debug, Clone, Build)]
    struct Wrapper<T>(T, #[state] Vec<u8>);

    #[derive(Debug, Clone, Build)]
    struct Unit;

    #[test]
    fn provide_generic_tuple_struct() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            greeting: Greeting("hi"),
        };

        let wrapper: Wrapper<Greeter> = provider.provide();
        let _: Unit = provider.provide();

        assert_eq!(wrapper.0.greeting, Greeting("hi"));
        assert!(wrapper.1.is_empty());
    }
}
