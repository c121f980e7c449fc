//! The owning allocation unit behind arrays.
use std::fmt;
use std::mem;
use std::ptr::NonNull;
use std::sync::Arc;

use log::trace;

use crate::element::{Element, ElementType};
use crate::error::{NdError, NdResult};

/// A buffer of elements shared by one or more arrays.
///
/// A container is always handled through an `Arc`: every [`Array`](crate::Array)
/// viewing the buffer holds one strong reference, and the buffer is released
/// exactly when the last reference is dropped. Reference counting is atomic,
/// so containers may be retained and released from several threads.
///
/// The buffer is either owned (allocated here, or adopted from a `Vec`) or
/// wrapped external memory that is never freed by the container.
///
/// Element data is not synchronized. Arrays that alias one container see each
/// other's writes; arrays themselves are not `Send`, so those writes never
/// come from two threads at once.
pub struct Container<T> {
    ptr: NonNull<T>,
    len: usize,
    capacity: usize,
    owned: bool,
}

// Lifetime management is thread-safe; element access goes through raw
// pointers and follows the contract documented on `Container`.
unsafe impl<T: Send> Send for Container<T> {}
unsafe impl<T: Send + Sync> Sync for Container<T> {}

impl<T: Element> Container<T> {
    /// Allocate a buffer of `count` elements, each set to `T::default()`
    /// (zero, `false` for booleans).
    ///
    /// **Errors** with `AllocationError` if the byte size overflows `isize` or
    /// the allocator can't provide the memory.
    pub fn allocate(count: usize) -> NdResult<Arc<Self>> {
        let alloc_error = || NdError::AllocationError {
            count,
            element: T::DTYPE,
        };
        match count.checked_mul(mem::size_of::<T>()) {
            Some(bytes) if bytes <= isize::MAX as usize => {}
            _ => return Err(alloc_error()),
        }
        let mut v = Vec::new();
        v.try_reserve_exact(count).map_err(|_| alloc_error())?;
        v.resize(count, T::default());
        trace!("allocated container of {} {} elements", count, T::DTYPE);
        Ok(Arc::new(Self::adopt(v)))
    }

    /// Take ownership of the elements of `v` without copying.
    pub fn from_vec(v: Vec<T>) -> Arc<Self> {
        trace!("adopted vector of {} {} elements", v.len(), T::DTYPE);
        Arc::new(Self::adopt(v))
    }

    fn adopt(v: Vec<T>) -> Self {
        let mut v = mem::ManuallyDrop::new(v);
        Container {
            ptr: NonNull::from(v.as_mut_slice()).cast::<T>(),
            len: v.len(),
            capacity: v.capacity(),
            owned: true,
        }
    }

    /// Wrap `len` elements of external memory starting at `ptr` without
    /// copying.
    ///
    /// The container never frees wrapped memory.
    ///
    /// **Errors** with `InvalidArgument` if `ptr` is null and `len` is not zero.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` properly aligned and
    /// initialized elements for as long as the container or any array derived
    /// from it is alive, and the memory must not be accessed through other
    /// pointers in the meantime except through such arrays.
    pub unsafe fn wrap(ptr: *mut T, len: usize) -> NdResult<Arc<Self>> {
        let ptr = match NonNull::new(ptr) {
            Some(p) => p,
            None if len == 0 => NonNull::dangling(),
            None => return Err(NdError::InvalidArgument("null pointer for a non-empty buffer")),
        };
        trace!("wrapped external buffer of {} {} elements", len, T::DTYPE);
        Ok(Arc::new(Container {
            ptr,
            len,
            capacity: len,
            owned: false,
        }))
    }

    /// Take one more reference to the container.
    #[inline]
    pub fn retain(this: &Arc<Self>) -> Arc<Self> {
        Arc::clone(this)
    }

    /// Give up a reference; the buffer is released when it was the last one.
    #[inline]
    pub fn release(this: Arc<Self>) {
        drop(this)
    }

    /// Number of live references to the container.
    #[inline]
    pub fn ref_count(this: &Arc<Self>) -> usize {
        Arc::strong_count(this)
    }

    /// Number of elements in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return true if the buffer is freed by the container.
    #[inline]
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    #[inline]
    pub fn element_type(&self) -> ElementType {
        ElementType::of::<T>()
    }

    /// Return a raw pointer to the first element of the buffer.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Copy the whole buffer, in memory order.
    pub fn to_vec(&self) -> Vec<T> {
        (0..self.len).map(|i| unsafe { self.read(i as isize) }).collect()
    }

    /// Read the element at `offset`.
    ///
    /// # Safety
    ///
    /// `offset` must lie in `0..len`.
    #[inline(always)]
    pub(crate) unsafe fn read(&self, offset: isize) -> T {
        debug_assert!(offset >= 0 && (offset as usize) < self.len);
        self.ptr.as_ptr().offset(offset).read()
    }

    /// Write the element at `offset`.
    ///
    /// # Safety
    ///
    /// `offset` must lie in `0..len`.
    #[inline(always)]
    pub(crate) unsafe fn write(&self, offset: isize, value: T) {
        debug_assert!(offset >= 0 && (offset as usize) < self.len);
        self.ptr.as_ptr().offset(offset).write(value)
    }
}

impl<T> Drop for Container<T> {
    fn drop(&mut self) {
        if self.owned {
            unsafe {
                drop(Vec::from_raw_parts(self.ptr.as_ptr(), self.len, self.capacity));
            }
        }
        trace!("released container of {} elements", self.len);
    }
}

impl<T: Element> fmt::Debug for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("len", &self.len)
            .field("element", &T::DTYPE)
            .field("owned", &self.owned)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::thread;

    #[test]
    fn allocate_zeroes() {
        let c = Container::<f64>::allocate(5).unwrap();
        assert_eq!(c.len(), 5);
        assert!(c.is_owned());
        assert_eq!(c.to_vec(), vec![0.; 5]);
        let b = Container::<bool>::allocate(3).unwrap();
        assert_eq!(b.to_vec(), vec![false; 3]);
    }

    #[test]
    fn allocation_failure_is_reported() {
        let err = Container::<f64>::allocate(usize::MAX / 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AllocationError);
    }

    #[test]
    fn reference_counting() {
        let c = Container::from_vec(vec![1u8, 2, 3]);
        let d = Container::retain(&c);
        assert_eq!(Container::ref_count(&c), 2);
        Container::release(d);
        assert_eq!(Container::ref_count(&c), 1);
    }

    #[test]
    fn concurrent_retain_release() {
        let c = Container::<i32>::allocate(16).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = Container::retain(&c);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        let extra = Container::retain(&c);
                        Container::release(extra);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(Container::ref_count(&c), 1);
    }

    #[test]
    fn wrapped_memory_is_not_freed() {
        let mut backing = vec![1.0f32, 2.0, 3.0];
        {
            let c = unsafe { Container::wrap(backing.as_mut_ptr(), backing.len()).unwrap() };
            assert!(!c.is_owned());
            unsafe { c.write(1, 7.0) };
        }
        assert_eq!(backing, vec![1.0, 7.0, 3.0]);
        assert!(unsafe { Container::<f32>::wrap(std::ptr::null_mut(), 0) }.is_ok());
        assert!(unsafe { Container::<f32>::wrap(std::ptr::null_mut(), 2) }.is_err());
    }
}
