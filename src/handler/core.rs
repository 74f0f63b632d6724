use std::any::type_name;
use std::iter::Enumerate;
use std::marker::PhantomData;
use std::slice::Iter;
use std::sync::Arc;

use super::FromParam;
use crate::dispatcher::{DispatchError, Request, Response};

/// A type-erased route handler.
///
/// Handlers receive the request and the captured path values in
/// left-to-right placeholder order. Most code never implements this directly;
/// plain functions and controller methods are turned into handlers through
/// [`IntoHandler`].
pub trait Handler: Send + Sync + 'static {
    /// Name used in logs and route listings
    fn name(&self) -> &str;

    /// Number of path arguments accepted, `None` if any count is accepted.
    fn arity(&self) -> Option<usize>;

    /// Invoke the handler.
    ///
    /// # Errors
    ///
    /// [`DispatchError::HandlerInvocation`] when `args` does not fit the
    /// handler's parameters; [`DispatchError::Handler`] when the handler
    /// itself fails.
    fn call(&self, req: &Request, args: &[String]) -> Result<Response, DispatchError>;
}

/// Conversion of a handler return value into a response.
pub trait IntoResponse {
    /// # Errors
    ///
    /// Whatever error the handler returned.
    fn into_response(self) -> anyhow::Result<Response>;
}

impl IntoResponse for Response {
    fn into_response(self) -> anyhow::Result<Response> {
        Ok(self)
    }
}

impl IntoResponse for String {
    fn into_response(self) -> anyhow::Result<Response> {
        Ok(Response::text(self))
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> anyhow::Result<Response> {
        Ok(Response::text(self))
    }
}

impl IntoResponse for serde_json::Value {
    fn into_response(self) -> anyhow::Result<Response> {
        Ok(Response::json(200, self))
    }
}

impl IntoResponse for () {
    fn into_response(self) -> anyhow::Result<Response> {
        Ok(Response::ok())
    }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: Into<anyhow::Error>,
{
    fn into_response(self) -> anyhow::Result<Response> {
        self.map_err(Into::into)?.into_response()
    }
}

/// Conversion into a shared [`Handler`].
///
/// `M` is a marker that only exists to keep the blanket impls apart:
///
/// - `Fn(&Request, T1, .., Tn) -> R` for plain functions and closures
/// - `Fn(&C, &Request, T1, .., Tn) -> R` for controller methods, where a fresh
///   `C::default()` is built for every call
/// - `Arc<dyn Handler>` for handlers that are already erased
///
/// with up to six `Ti: FromParam` arguments and `R: IntoResponse`.
pub trait IntoHandler<M>: Send + Sync + Sized + 'static {
    fn into_handler(self) -> Arc<dyn Handler>;
}

impl IntoHandler<Erased> for Arc<dyn Handler> {
    fn into_handler(self) -> Arc<dyn Handler> {
        self
    }
}

/// Marker for already type-erased handlers.
pub struct Erased;

/// Marker for plain functions taking `(&Request, Args...)`.
pub struct Plain<Args>(PhantomData<Args>);

/// Marker for controller methods taking `(&C, &Request, Args...)`.
pub struct Action<C, Args>(PhantomData<(C, Args)>);

/// Adapter holding a function together with the shape it was registered with.
pub struct FnHandler<F, M> {
    f: F,
    name: &'static str,
    _marker: PhantomData<fn() -> M>,
}

impl<F, M> FnHandler<F, M> {
    fn new(f: F) -> Self {
        Self {
            f,
            name: type_name::<F>(),
            _marker: PhantomData,
        }
    }

    fn check_arity<'a>(
        &self,
        expected: usize,
        args: &'a [String],
    ) -> Result<Enumerate<Iter<'a, String>>, DispatchError> {
        if args.len() != expected {
            return Err(DispatchError::HandlerInvocation {
                handler: self.name.to_string(),
                reason: format!(
                    "expected {expected} path argument(s), got {}",
                    args.len()
                ),
            });
        }
        Ok(args.iter().enumerate())
    }

    fn next_arg<T: FromParam>(
        &self,
        values: &mut Enumerate<Iter<'_, String>>,
    ) -> Result<T, DispatchError> {
        let (position, raw) = values.next().ok_or_else(|| DispatchError::HandlerInvocation {
            handler: self.name.to_string(),
            reason: "ran out of path arguments".to_string(),
        })?;
        T::from_param(raw).map_err(|e| DispatchError::HandlerInvocation {
            handler: self.name.to_string(),
            reason: format!(
                "argument {position} ({raw:?}) is not a valid {}: {e}",
                type_name::<T>()
            ),
        })
    }

    fn failed(&self, source: anyhow::Error) -> DispatchError {
        DispatchError::Handler {
            handler: self.name.to_string(),
            source,
        }
    }
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_handler {
    ($($ty:ident),*) => {
        impl<F, R, $($ty,)*> Handler for FnHandler<F, Plain<($($ty,)*)>>
        where
            F: Fn(&Request, $($ty,)*) -> R + Send + Sync + 'static,
            R: IntoResponse + 'static,
            $($ty: FromParam + 'static,)*
        {
            fn name(&self) -> &str {
                self.name
            }

            fn arity(&self) -> Option<usize> {
                Some(count!($($ty)*))
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call(&self, req: &Request, args: &[String]) -> Result<Response, DispatchError> {
                let mut values = self.check_arity(count!($($ty)*), args)?;
                $(let $ty = self.next_arg::<$ty>(&mut values)?;)*
                (self.f)(req, $($ty,)*)
                    .into_response()
                    .map_err(|source| self.failed(source))
            }
        }

        impl<F, R, $($ty,)*> IntoHandler<Plain<($($ty,)*)>> for F
        where
            F: Fn(&Request, $($ty,)*) -> R + Send + Sync + 'static,
            R: IntoResponse + 'static,
            $($ty: FromParam + 'static,)*
        {
            fn into_handler(self) -> Arc<dyn Handler> {
                Arc::new(FnHandler::<F, Plain<($($ty,)*)>>::new(self))
            }
        }

        impl<F, C, R, $($ty,)*> Handler for FnHandler<F, Action<C, ($($ty,)*)>>
        where
            F: Fn(&C, &Request, $($ty,)*) -> R + Send + Sync + 'static,
            C: Default + 'static,
            R: IntoResponse + 'static,
            $($ty: FromParam + 'static,)*
        {
            fn name(&self) -> &str {
                self.name
            }

            fn arity(&self) -> Option<usize> {
                Some(count!($($ty)*))
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call(&self, req: &Request, args: &[String]) -> Result<Response, DispatchError> {
                let mut values = self.check_arity(count!($($ty)*), args)?;
                $(let $ty = self.next_arg::<$ty>(&mut values)?;)*
                let controller = C::default();
                (self.f)(&controller, req, $($ty,)*)
                    .into_response()
                    .map_err(|source| self.failed(source))
            }
        }

        impl<F, C, R, $($ty,)*> IntoHandler<Action<C, ($($ty,)*)>> for F
        where
            F: Fn(&C, &Request, $($ty,)*) -> R + Send + Sync + 'static,
            C: Default + 'static,
            R: IntoResponse + 'static,
            $($ty: FromParam + 'static,)*
        {
            fn into_handler(self) -> Arc<dyn Handler> {
                Arc::new(FnHandler::<F, Action<C, ($($ty,)*)>>::new(self))
            }
        }
    };
}

impl_handler!();
impl_handler!(T1);
impl_handler!(T1, T2);
impl_handler!(T1, T2, T3);
impl_handler!(T1, T2, T3, T4);
impl_handler!(T1, T2, T3, T4, T5);
impl_handler!(T1, T2, T3, T4, T5, T6);
