mod span;
