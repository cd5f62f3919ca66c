use std::{collections::HashMap, fmt::Debug};

use crossterm::event::KeyCode;

use crate::{
	input::Input,
	program::{Action, Direction},
};

#[derive(Debug)]
pub struct Bindings<A>(HashMap<Input, A>);

impl Default for Bindings<Action> {
	fn default() -> Self {
		use Action::*;
		use KeyCode::*;

		let mut s = Self::empty();

		// movement
		s.insert(Up.into(), Move(Direction::Up));
		s.insert(Down.into(), Move(Direction::Down));
		s.insert(Left.into(), Move(Direction::Left));
		s.insert(Right.into(), Move(Direction::Right));
		s.insert(Tab.into(), Move(Direction::Down));
		s.insert(BackTab.into(), Move(Direction::Up));
		s.insert(Char('k').into(), Move(Direction::Up));
		s.insert(Char('j').into(), Move(Direction::Down));
		s.insert(Char('h').into(), Move(Direction::Left));
		s.insert(Char('l').into(), Move(Direction::Right));

		s.insert(Enter.into(), Edit);
		s.insert(F(2).into(), Edit);
		s.insert(Char(' ').into(), Toggle);
		s.insert(Input::ctrl('s'), Apply);
		s.insert(Input::ctrl('r'), Revert);
		s.insert(Input::ctrl('c'), Quit);
		s.insert(F(11).into(), DumpState);
		s.insert(F(12).into(), ToggleDebug);

		s
	}
}

impl<A: Debug> Bindings<A> {
	pub fn empty() -> Self {
		Self(Default::default())
	}

	pub fn get(&self, k: impl Into<Input>) -> Option<&A> {
		self.0.get(&k.into())
	}

	pub fn insert(&mut self, k: Input, v: A) {
		if let Some(a) = self.0.get(&k) {
			panic!("Input already bound: {k:?} => {a:?}");
		}
		self.0.insert(k, v);
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Input, &A)> {
		self.0.iter()
	}

	/// First input bound to `action`, in a stable order.
	pub fn key_for(&self, action: &A) -> Option<Input>
	where
		A: PartialEq,
	{
		let mut keys: Vec<_> = self
			.iter()
			.filter(|(_, a)| *a == action)
			.map(|(i, _)| *i)
			.collect();
		keys.sort_by_key(|i| i.to_string());
		keys.into_iter().next()
	}
}
