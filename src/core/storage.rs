use crate::core::{BallHandle, WallHandle};
use crate::error::PhysicsError;
use crate::Result;

/// Generic storage trait for simulation objects.
///
/// Backed by a plain vector with index handles: registration order is
/// iteration order, which keeps detection sweeps deterministic. Objects
/// live for the whole simulation run, so there is no removal; `clear`
/// invalidates every outstanding handle.
pub trait Storage<T, H> {
    /// Creates a new empty storage
    fn new() -> Self;

    /// Adds an item to the storage and returns its handle
    fn add(&mut self, item: T) -> H;

    /// Gets a reference to an item by its handle
    fn get(&self, handle: H) -> Option<&T>;

    /// Gets a mutable reference to an item by its handle
    fn get_mut(&mut self, handle: H) -> Option<&mut T>;

    /// Returns the number of items in the storage
    fn len(&self) -> usize;

    /// Returns whether the storage is empty
    fn is_empty(&self) -> bool;

    /// Clears all items from the storage
    fn clear(&mut self);

    /// Returns all handles in registration order
    fn handles(&self) -> Vec<H>;

    /// Returns an iterator over all items
    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a
    where
        T: 'a;

    /// Returns a mutable iterator over all items
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a
    where
        T: 'a;
}

/// Storage for balls
pub struct BallStorage<T> {
    items: Vec<T>,
}

impl<T> Storage<T, BallHandle> for BallStorage<T> {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn add(&mut self, item: T) -> BallHandle {
        let handle = BallHandle(self.items.len() as u32);
        self.items.push(item);
        handle
    }

    fn get(&self, handle: BallHandle) -> Option<&T> {
        self.items.get(handle.0 as usize)
    }

    fn get_mut(&mut self, handle: BallHandle) -> Option<&mut T> {
        self.items.get_mut(handle.0 as usize)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn handles(&self) -> Vec<BallHandle> {
        (0..self.items.len() as u32).map(BallHandle).collect()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (BallHandle, &'a T)> + 'a
    where
        T: 'a,
    {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (BallHandle(i as u32), item))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (BallHandle, &'a mut T)> + 'a
    where
        T: 'a,
    {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| (BallHandle(i as u32), item))
    }
}

impl<T> BallStorage<T> {
    /// Gets a ball by its handle, returning an error if not found
    pub fn get_ball(&self, handle: BallHandle) -> Result<&T> {
        self.get(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Ball with handle {:?} not found", handle))
        })
    }

    /// Gets a mutable reference to a ball by its handle, returning an error
    /// if not found
    pub fn get_ball_mut(&mut self, handle: BallHandle) -> Result<&mut T> {
        self.get_mut(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Ball with handle {:?} not found", handle))
        })
    }

    /// Gets mutable references to two distinct balls at once
    pub fn get_pair_mut(&mut self, a: BallHandle, b: BallHandle) -> Result<(&mut T, &mut T)> {
        let (ia, ib) = (a.0 as usize, b.0 as usize);
        if ia == ib {
            return Err(PhysicsError::InvalidParameter(format!(
                "pair access requires distinct handles, got {:?} twice",
                a
            )));
        }
        if ia >= self.items.len() || ib >= self.items.len() {
            return Err(PhysicsError::ResourceNotFound(format!(
                "Ball pair ({:?}, {:?}) not found",
                a, b
            )));
        }

        if ia < ib {
            let (head, tail) = self.items.split_at_mut(ib);
            Ok((&mut head[ia], &mut tail[0]))
        } else {
            let (head, tail) = self.items.split_at_mut(ia);
            Ok((&mut tail[0], &mut head[ib]))
        }
    }
}

/// Storage for walls
pub struct WallStorage<T> {
    items: Vec<T>,
}

impl<T> Storage<T, WallHandle> for WallStorage<T> {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn add(&mut self, item: T) -> WallHandle {
        let handle = WallHandle(self.items.len() as u32);
        self.items.push(item);
        handle
    }

    fn get(&self, handle: WallHandle) -> Option<&T> {
        self.items.get(handle.0 as usize)
    }

    fn get_mut(&mut self, handle: WallHandle) -> Option<&mut T> {
        self.items.get_mut(handle.0 as usize)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn handles(&self) -> Vec<WallHandle> {
        (0..self.items.len() as u32).map(WallHandle).collect()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (WallHandle, &'a T)> + 'a
    where
        T: 'a,
    {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (WallHandle(i as u32), item))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (WallHandle, &'a mut T)> + 'a
    where
        T: 'a,
    {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| (WallHandle(i as u32), item))
    }
}

impl<T> WallStorage<T> {
    /// Gets a wall by its handle, returning an error if not found
    pub fn get_wall(&self, handle: WallHandle) -> Result<&T> {
        self.get(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Wall with handle {:?} not found", handle))
        })
    }
}
