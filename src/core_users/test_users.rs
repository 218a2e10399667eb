// Tests for registry parsing, cache invalidation, shadow resolution and the
// lookup facade, over throwaway database files.
