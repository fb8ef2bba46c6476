use crate::foundation::error::FrameResult;
use crate::frame::entity::Frame;
use crate::frame::stack::Stack;
use crate::service::ServiceRef;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Entry on a frame's service stack.
///
/// Every item is tagged, so a pop that expects one kind and finds another fails with
/// [`FrameError::StackMismatch`](crate::FrameError::StackMismatch) instead of misreading it.
pub enum ServiceItem {
    /// A service object, typically the stage that is currently resolving.
    Service(ServiceRef),
    /// Any other shared reference a stage wants to carry.
    Data(Arc<dyn Any + Send + Sync>),
    /// A small integer.
    Int(i64),
    /// Another frame, e.g. the second input of a transition.
    Frame(Box<Frame>),
}

impl ServiceItem {
    fn kind(&self) -> &'static str {
        match self {
            Self::Service(_) => "a service",
            Self::Data(_) => "shared data",
            Self::Int(_) => "an integer",
            Self::Frame(_) => "a frame",
        }
    }
}

impl fmt::Debug for ServiceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(s) => f.debug_tuple("Service").field(&s.name()).finish(),
            Self::Data(_) => f.write_str("Data(..)"),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Frame(frame) => f.debug_tuple("Frame").field(frame).finish(),
        }
    }
}

impl Frame {
    /// Push a service reference onto the service stack.
    pub fn push_service(&mut self, service: ServiceRef) {
        self.service_stack.push(ServiceItem::Service(service));
    }

    /// Pop a service reference.
    pub fn pop_service(&mut self) -> FrameResult<Option<ServiceRef>> {
        self.service_stack
            .pop_matching("service", "a service", ServiceItem::kind, |item| match item {
                ServiceItem::Service(service) => Ok(service),
                other => Err(other),
            })
    }

    /// Push an arbitrary shared reference onto the service stack.
    pub fn push_service_data<T: Any + Send + Sync>(&mut self, data: Arc<T>) {
        self.service_stack.push(ServiceItem::Data(data));
    }

    /// Pop a shared reference of type `T`.
    pub fn pop_service_data<T: Any + Send + Sync>(&mut self) -> FrameResult<Option<Arc<T>>> {
        let expected = format!("shared data of type {}", std::any::type_name::<T>());
        self.service_stack
            .pop_matching("service", &expected, ServiceItem::kind, |item| match item {
                ServiceItem::Data(data) => data.downcast::<T>().map_err(ServiceItem::Data),
                other => Err(other),
            })
    }

    /// Push an integer onto the service stack.
    pub fn push_service_int(&mut self, value: i64) {
        self.service_stack.push(ServiceItem::Int(value));
    }

    /// Pop an integer.
    pub fn pop_service_int(&mut self) -> FrameResult<Option<i64>> {
        self.service_stack
            .pop_matching("service", "an integer", ServiceItem::kind, |item| match item {
                ServiceItem::Int(value) => Ok(value),
                other => Err(other),
            })
    }

    /// Push another frame onto the service stack, transferring ownership of it.
    pub fn push_frame(&mut self, other: Frame) {
        self.service_stack.push(ServiceItem::Frame(Box::new(other)));
    }

    /// Pop a frame.
    pub fn pop_frame(&mut self) -> FrameResult<Option<Frame>> {
        self.service_stack
            .pop_matching("service", "a frame", ServiceItem::kind, |item| match item {
                ServiceItem::Frame(frame) => Ok(*frame),
                other => Err(other),
            })
    }

    /// Number of items on the service stack.
    pub fn service_stack_len(&self) -> usize {
        self.service_stack.len()
    }

    /// Borrow the service stack.
    pub fn service_stack(&self) -> &Stack<ServiceItem> {
        &self.service_stack
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/service.rs"]
mod tests;
